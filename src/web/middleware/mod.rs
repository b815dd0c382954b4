//! Middleware for the Web API.

mod auth;
mod cors;
mod security;

pub use auth::{jwt_auth, AuthUser, JwtClaims, JwtState};
pub use cors::create_cors_layer;
pub use security::security_headers;
