// src/models/collection.rs
// DOCUMENTATION: The three upstream collections
// PURPOSE: Name collections once for URLs, logs and errors

use serde::Serialize;
use std::fmt;

/// Logical remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Photos,
    Albums,
    Users,
}

impl Collection {
    /// Path segment of the collection on the upstream source
    pub fn path(&self) -> &'static str {
        match self {
            Collection::Photos => "photos",
            Collection::Albums => "albums",
            Collection::Users => "users",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
