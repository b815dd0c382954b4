//! Authentication module for VDRIVE.
//!
//! Provides password hashing and verification. Token issuance lives in the
//! web layer next to the handlers that use it.

mod password;

pub use password::{
    hash_password, validate_password, verify_password, PasswordError, MAX_PASSWORD_LENGTH,
    MIN_PASSWORD_LENGTH,
};
