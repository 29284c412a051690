//! REST API client module for the Melodica backend.
//!
//! This module provides the `ApiClient` for the two authentication
//! endpoints (`/register` and `/login`) and the error type carrying the
//! raw server-provided rejection reason.
//!
//! The API returns a JWT bearer token on successful login; session
//! persistence and expiry handling live in [`crate::auth`].

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::{user_message, ApiError};
