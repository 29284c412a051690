//! Authentication module for managing the user session.
//!
//! This module provides:
//! - `SessionStore`: observable holder of the current access data
//! - `SessionStorage`: on-disk persistence of the session between runs
//! - `AuthService`: lifecycle glue - login, restore, automatic logout at
//!   token expiry
//!
//! Sessions are persisted as JSON and expire when the JWT's `exp` claim
//! is reached.

pub mod service;
pub mod storage;
pub mod store;
pub mod token;

pub use service::AuthService;
pub use storage::SessionStorage;
pub use store::{SessionStore, SubscriptionId};
pub use token::TokenError;
