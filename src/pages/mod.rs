//! Publication module for VDRIVE.
//!
//! World-readable HTML pages published under their owner's username.

mod page;
mod repository;
mod service;

pub use page::{validate_page_name, PublicPage, MAX_PAGE_NAME_LENGTH};
pub use repository::PageRepository;
pub use service::PageService;
