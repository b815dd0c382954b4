//! Sharing module for VDRIVE.
//!
//! Per-file grants that let one user read, or read and modify, a file
//! owned by another user.

mod permission;
mod repository;
mod service;

pub use permission::{PermissionLevel, SharePermission, SharedFile};
pub use repository::ShareRepository;
pub use service::ShareService;
