//! Core client library for Melodica, a music-streaming application.
//!
//! This crate provides the authentication and session layer used by the
//! Melodica front-ends: an API client for the register/login endpoints,
//! an observable session store, and a lifecycle service that persists
//! sessions across restarts and logs out automatically when the access
//! token expires.
//!
//! UI rendering and route definitions live in the host application; this
//! crate only exposes the hooks they need (the [`SessionStore`] observers
//! and the [`AuthService`] logout hook).

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

pub use api::{ApiClient, ApiError};
pub use auth::{AuthService, SessionStorage, SessionStore, SubscriptionId};
pub use config::Config;
pub use models::{AccessData, LoginRequest, RegisterRequest, User};
