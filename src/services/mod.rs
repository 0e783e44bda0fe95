// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod collection_client;
pub mod enrichment;
pub mod filter_resolver;
pub mod jsonplaceholder_client;
pub mod photo_service;
pub mod supersede;

#[cfg(test)]
pub mod test_support;

pub use collection_client::*;
pub use enrichment::*;
pub use filter_resolver::*;
pub use jsonplaceholder_client::*;
pub use photo_service::*;
pub use supersede::*;
