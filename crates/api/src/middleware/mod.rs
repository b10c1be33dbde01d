//! Request extractors shared by handlers.
//!
//! - [`auth::AuthUser`] -- Requires a Bearer token in the `Authorization` header.

pub mod auth;
