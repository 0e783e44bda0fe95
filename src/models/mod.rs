// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod album;
pub mod collection;
pub mod filter;
pub mod photo;
pub mod user;

pub use album::*;
pub use collection::*;
pub use filter::*;
pub use photo::*;
pub use user::*;
