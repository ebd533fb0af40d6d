//! File record entity and query types.

use serde::Serialize;

use super::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

/// A file metadata record.
///
/// `storage_key` joins the record to its blob; the internal row id is never
/// exposed outside the crate.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct FileRecord {
    #[serde(skip_serializing)]
    pub id: i64,
    pub storage_key: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    #[serde(skip_serializing)]
    pub owner_id: String,
    pub uploaded_at: String,
    pub deleted: bool,
    pub deleted_at: Option<String>,
}

/// Data for creating a new file record.
#[derive(Debug, Clone)]
pub struct NewFileRecord {
    pub storage_key: String,
    pub original_name: String,
    pub mimetype: String,
    pub size: i64,
    pub owner_id: String,
}

impl NewFileRecord {
    pub fn new(
        storage_key: impl Into<String>,
        original_name: impl Into<String>,
        mimetype: impl Into<String>,
        size: i64,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            storage_key: storage_key.into(),
            original_name: original_name.into(),
            mimetype: mimetype.into(),
            size,
            owner_id: owner_id.into(),
        }
    }
}

/// Which lifecycle states a listing selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrashFilter {
    /// Active files only (trash excluded).
    #[default]
    Active,
    /// Trashed files only.
    Trashed,
}

/// An owner-scoped listing query.
///
/// Built with the fluent setters; out-of-range page and limit values are
/// clamped rather than rejected.
#[derive(Debug, Clone)]
pub struct FileQuery {
    pub owner_id: String,
    pub search: Option<String>,
    pub trash: TrashFilter,
    pub page: u32,
    pub limit: u32,
}

impl FileQuery {
    pub fn new(owner_id: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            search: None,
            trash: TrashFilter::Active,
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
        }
    }

    /// Filter by a case-insensitive substring of the original name.
    ///
    /// Blank search terms are ignored.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        let search = search.into();
        if !search.trim().is_empty() {
            self.search = Some(search);
        }
        self
    }

    pub fn with_trash(mut self, trash: TrashFilter) -> Self {
        self.trash = trash;
        self
    }

    /// Set the page number. Values below 1 clamp to 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    /// Set the page size, clamped to 1..=MAX_PAGE_SIZE.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_PAGE_SIZE);
        self
    }

    /// Row offset of the first item on the requested page.
    ///
    /// Computed in u64 so an absurdly large page number yields a past-the-end
    /// offset (empty page) rather than overflowing.
    pub fn offset(&self) -> u64 {
        (self.page as u64 - 1) * self.limit as u64
    }
}

/// One page of listing results plus pagination metadata.
#[derive(Debug, Clone, Serialize)]
pub struct FilePage {
    pub files: Vec<FileRecord>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_files: i64,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl FilePage {
    /// Assemble a page from query results and the unpaginated total.
    pub fn new(files: Vec<FileRecord>, query: &FileQuery, total: i64) -> Self {
        let total_pages = (total as u64).div_ceil(query.limit as u64) as u32;

        Self {
            files,
            current_page: query.page,
            total_pages,
            total_files: total,
            has_next_page: (query.page as i64) * (query.limit as i64) < total,
            has_prev_page: query.page > 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults() {
        let query = FileQuery::new("alice");
        assert_eq!(query.owner_id, "alice");
        assert!(query.search.is_none());
        assert_eq!(query.trash, TrashFilter::Active);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_query_page_clamped_to_one() {
        let query = FileQuery::new("alice").with_page(0);
        assert_eq!(query.page, 1);
    }

    #[test]
    fn test_query_limit_clamped() {
        assert_eq!(FileQuery::new("a").with_limit(0).limit, 1);
        assert_eq!(FileQuery::new("a").with_limit(50).limit, 50);
        assert_eq!(FileQuery::new("a").with_limit(10_000).limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_query_blank_search_ignored() {
        let query = FileQuery::new("alice").with_search("   ");
        assert!(query.search.is_none());

        let query = FileQuery::new("alice").with_search("report");
        assert_eq!(query.search.as_deref(), Some("report"));
    }

    #[test]
    fn test_query_offset() {
        let query = FileQuery::new("alice").with_page(3).with_limit(20);
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_query_offset_huge_page() {
        let query = FileQuery::new("alice").with_page(u32::MAX).with_limit(100);
        assert_eq!(query.offset(), (u32::MAX as u64 - 1) * 100);
    }

    #[test]
    fn test_page_metadata() {
        let query = FileQuery::new("alice").with_page(2).with_limit(20);
        let page = FilePage::new(Vec::new(), &query, 45);

        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.total_files, 45);
        assert!(page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn test_page_metadata_last_page() {
        let query = FileQuery::new("alice").with_page(3).with_limit(20);
        let page = FilePage::new(Vec::new(), &query, 45);

        assert!(!page.has_next_page);
        assert!(page.has_prev_page);
    }

    #[test]
    fn test_page_metadata_empty() {
        let query = FileQuery::new("alice");
        let page = FilePage::new(Vec::new(), &query, 0);

        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next_page);
        assert!(!page.has_prev_page);
    }

    #[test]
    fn test_page_metadata_exact_multiple() {
        let query = FileQuery::new("alice").with_page(2).with_limit(20);
        let page = FilePage::new(Vec::new(), &query, 40);

        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next_page);
    }
}
