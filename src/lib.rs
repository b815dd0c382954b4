//! VDRIVE - Virtual Drive Service
//!
//! A multi-tenant virtual filesystem service: per-user trees of directories
//! and files addressable by ID or slash path, soft deletion, per-file
//! sharing grants, and publication of HTML files as world-readable pages.

pub mod auth;
pub mod config;
pub mod datetime;
pub mod db;
pub mod error;
pub mod fs;
pub mod logging;
pub mod pages;
pub mod sharing;
pub mod web;

pub use auth::{hash_password, validate_password, verify_password, PasswordError};
pub use config::Config;
pub use db::{Database, NewUser, User, UserRepository};
pub use error::{Result, VdriveError};
pub use fs::{BlobStore, FsService, Node};
pub use pages::{PageService, PublicPage};
pub use sharing::{PermissionLevel, SharePermission, ShareService};
pub use web::WebServer;
