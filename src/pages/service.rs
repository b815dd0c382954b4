//! Publication service for VDRIVE.
//!
//! Publishing takes HTML content and makes it world-readable at a stable
//! URL under the owner's username. The public name maps to a UUID blob key,
//! so a URL never reveals or guesses on-disk layout.

use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::db::Database;
use crate::fs::{sniff_content_type, BlobStore};
use crate::{Result, VdriveError};

use super::page::{validate_page_name, PublicPage};
use super::repository::PageRepository;

/// High-level publication operations.
#[derive(Clone)]
pub struct PageService {
    db: Arc<Database>,
    store: BlobStore,
    max_page_bytes: u64,
}

impl PageService {
    /// Create a new PageService.
    pub fn new(db: Arc<Database>, store: BlobStore, max_page_bytes: u64) -> Self {
        Self {
            db,
            store,
            max_page_bytes,
        }
    }

    fn pages(&self) -> PageRepository<'_> {
        PageRepository::new(self.db.pool())
    }

    /// Check the content is acceptable for publication.
    fn check_content(&self, content: &[u8]) -> Result<()> {
        if content.len() as u64 > self.max_page_bytes {
            return Err(VdriveError::Validation(format!(
                "page exceeds the upload limit of {} bytes",
                self.max_page_bytes
            )));
        }
        let content_type = sniff_content_type(content)?;
        if content_type != "text/html" {
            return Err(VdriveError::Validation(format!(
                "published pages must be HTML, got {content_type}"
            )));
        }
        Ok(())
    }

    /// Publish a page.
    ///
    /// The bytes must sniff as HTML regardless of the name. The record is
    /// inserted before the blob is written; a failed blob write removes the
    /// record again.
    pub async fn publish(&self, owner_id: i64, name: &str, content: &[u8]) -> Result<PublicPage> {
        validate_page_name(name)?;
        self.check_content(content)?;

        let physical_name = Uuid::new_v4().to_string();
        let page = self.pages().create(owner_id, name, &physical_name).await?;

        if let Err(e) = self
            .store
            .put(&owner_id.to_string(), &physical_name, content)
        {
            warn!(page_id = %page.id, error = %e, "page blob write failed, removing record");
            self.pages().delete(&page.id).await?;
            // Best-effort: a partial blob may exist
            let _ = self.store.delete(&owner_id.to_string(), &physical_name);
            return Err(e);
        }

        info!(owner_id, name, "page published");
        Ok(page)
    }

    /// Replace a published page's content. Owner only.
    pub async fn update(&self, owner_id: i64, page_id: &str, content: &[u8]) -> Result<PublicPage> {
        self.check_content(content)?;

        let page = self.require_owned(owner_id, page_id).await?;

        self.store
            .put(&owner_id.to_string(), &page.physical_name, content)?;
        self.pages().touch(&page.id).await?;

        self.pages()
            .get_by_id(&page.id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("page".to_string()))
    }

    /// List the requesting owner's pages.
    pub async fn list(&self, owner_id: i64) -> Result<Vec<PublicPage>> {
        self.pages().list_for_owner(owner_id).await
    }

    /// Get one of the requesting owner's pages.
    pub async fn get(&self, owner_id: i64, page_id: &str) -> Result<PublicPage> {
        self.require_owned(owner_id, page_id).await
    }

    /// Unpublish a page. Owner only.
    ///
    /// The record goes first, then the blob; a stray blob without a record
    /// is unreachable, so this order cannot leave a serveable ghost page.
    pub async fn unpublish(&self, owner_id: i64, page_id: &str) -> Result<()> {
        let page = self.require_owned(owner_id, page_id).await?;

        self.pages().delete(&page.id).await?;
        self.store
            .delete(&owner_id.to_string(), &page.physical_name)?;

        info!(owner_id, name = %page.name, "page unpublished");
        Ok(())
    }

    /// Serve a published page to anyone. No authentication involved.
    pub async fn serve(&self, username: &str, name: &str) -> Result<Vec<u8>> {
        let page = self
            .pages()
            .get_by_username_and_name(username, name)
            .await?
            .ok_or_else(|| VdriveError::NotFound(format!("page {username}/{name}")))?;

        self.store
            .get(&page.owner_id.to_string(), &page.physical_name)
    }

    async fn require_owned(&self, owner_id: i64, page_id: &str) -> Result<PublicPage> {
        let page = self
            .pages()
            .get_by_id(page_id)
            .await?
            .ok_or_else(|| VdriveError::NotFound("page".to_string()))?;

        if page.owner_id != owner_id {
            return Err(VdriveError::Permission("access denied".into()));
        }
        Ok(page)
    }
}
