//! Data models for the SmartShop REST API.
//!
//! Every endpoint answers with the same envelope shape,
//! `{ isSuccess, value: { code, message, data }, error }`:
//!
//! - `ApiEnvelope`, `ApiPayload`: the shared wrapper
//! - `LoginRequest`, `TokenData`: login exchange
//! - `RegisterRequest`, `UserData`: registration and profile

pub mod auth;
pub mod envelope;
pub mod user;

pub use auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, TokenData};
pub use envelope::{ApiEnvelope, ApiPayload};
pub use user::{UserData, UserResponse};
