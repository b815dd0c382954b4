//! Published page model for VDRIVE.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{Result, VdriveError};

/// Maximum length of a page name, extension included.
pub const MAX_PAGE_NAME_LENGTH: usize = 250;

/// A world-readable published HTML page.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PublicPage {
    /// Page ID (UUIDv4).
    pub id: String,
    /// Owning user ID.
    pub owner_id: i64,
    /// Public name, always ending in `.html` (unique per owner).
    pub name: String,
    /// Blob key on disk (UUIDv4, never derived from the public name).
    pub physical_name: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Validate a page name.
///
/// Page names appear verbatim in public URLs, so the charset is tighter
/// than node names: ASCII alphanumerics plus `.`, `_`, `-`, at most 250
/// characters, and the `.html` extension is mandatory.
pub fn validate_page_name(name: &str) -> Result<()> {
    if !name.ends_with(".html") || name.len() == ".html".len() {
        return Err(VdriveError::Validation(
            "page name must end in .html".into(),
        ));
    }
    if name.len() > MAX_PAGE_NAME_LENGTH {
        return Err(VdriveError::Validation(format!(
            "page name must be at most {MAX_PAGE_NAME_LENGTH} characters"
        )));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(VdriveError::Validation(format!(
            "invalid page name: {name:?}"
        )));
    }
    Ok(())
}
