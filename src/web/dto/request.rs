//! Request DTOs for the strongbox Web API.

use serde::Deserialize;

use crate::file::{FileQuery, TrashFilter};

/// Query parameters for file listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListFilesQuery {
    /// Page number (1-based).
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Substring filter on the original file name.
    pub search: Option<String>,
    /// When true, list the trash instead of active files.
    pub trash: Option<bool>,
}

impl ListFilesQuery {
    /// Convert into an owner-scoped domain query.
    pub fn into_file_query(self, owner_id: &str) -> FileQuery {
        let mut query = FileQuery::new(owner_id);

        if let Some(page) = self.page {
            query = query.with_page(page);
        }
        if let Some(limit) = self.limit {
            query = query.with_limit(limit);
        }
        if let Some(search) = self.search {
            query = query.with_search(search);
        }
        if self.trash.unwrap_or(false) {
            query = query.with_trash(TrashFilter::Trashed);
        }

        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::file::DEFAULT_PAGE_SIZE;

    #[test]
    fn test_defaults() {
        let query = ListFilesQuery::default().into_file_query("alice");
        assert_eq!(query.owner_id, "alice");
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
        assert_eq!(query.trash, TrashFilter::Active);
        assert!(query.search.is_none());
    }

    #[test]
    fn test_all_params() {
        let query = ListFilesQuery {
            page: Some(3),
            limit: Some(10),
            search: Some("report".to_string()),
            trash: Some(true),
        }
        .into_file_query("alice");

        assert_eq!(query.page, 3);
        assert_eq!(query.limit, 10);
        assert_eq!(query.search.as_deref(), Some("report"));
        assert_eq!(query.trash, TrashFilter::Trashed);
    }

    #[test]
    fn test_page_zero_clamped() {
        let query = ListFilesQuery {
            page: Some(0),
            ..Default::default()
        }
        .into_file_query("alice");

        assert_eq!(query.page, 1);
    }
}
