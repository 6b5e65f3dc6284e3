//! HTTP adapter for the TeamViewer Web API v1.
//!
//! [`WebApiClient`] implements [`tvadmin_core::RemoteApi`] over `reqwest`:
//! bearer authentication, JSON envelopes for devices, groups and users, and
//! a fixed mapping from HTTP status codes onto [`tvadmin_core::ApiError`].
//! Calls are never retried.

pub mod auth;
pub mod client;
pub mod config;
pub mod wire;

pub use auth::ApiToken;
pub use client::WebApiClient;
pub use config::{ConfigError, WebApiConfig, DEFAULT_API_URL};
