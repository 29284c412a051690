//! Data types exchanged with the Melodica API.
//!
//! Field names follow the API's camelCase wire format via serde renames.

use serde::{Deserialize, Serialize};

/// Result of a successful login or registration: the JWT access token plus
/// the profile of the user it was issued for.
///
/// This is the value held by the [`SessionStore`](crate::SessionStore) and
/// persisted to disk between runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessData {
    pub access_token: String,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub email: String,
}

/// Payload for the registration endpoint. Built by the host's signup form
/// and dropped after submission.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    pub email: String,
    pub password: String,
}

/// Payload for the login endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
