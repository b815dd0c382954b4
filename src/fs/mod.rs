//! Virtual filesystem module for VDRIVE.
//!
//! Per-user trees of directories and files, addressable by node ID or by
//! slash path, with soft deletion and sniffed content types.

mod node;
mod path;
mod repository;
mod service;
mod sniff;
mod storage;

pub use node::{validate_node_name, NewNode, Node, MAX_NODE_NAME_LENGTH};
pub use path::split_path;
pub use repository::NodeRepository;
pub use service::FsService;
pub use sniff::sniff_content_type;
pub use storage::BlobStore;
