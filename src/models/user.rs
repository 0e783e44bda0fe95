// src/models/user.rs
// DOCUMENTATION: Album owner profile
// PURPOSE: Typed view of the fields the API relies on, passthrough for the rest

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// User record from the upstream users collection
/// DOCUMENTATION: Only `id`, `name` and `email` are required. Every other
/// field is optional and omitted on output when the upstream did not send it
/// (or sent `null`); unknown fields are kept in `extra` and serialized back
/// out unchanged, so the enriched photo carries the profile as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,

    /// Any other profile fields
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Postal address of a user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suite: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zipcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geo: Option<Geo>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Coordinates as the upstream reports them (strings)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lng: Option<String>,
}

/// Company a user works for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catch_phrase: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bs: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
