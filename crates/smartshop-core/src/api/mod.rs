//! REST API client module for the SmartShop backend.
//!
//! This module provides the `ApiClient` for the auth and user endpoints.
//! Every request passes through the `RequestAuthenticator`, so calls made
//! after a login carry the stored bearer token.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
