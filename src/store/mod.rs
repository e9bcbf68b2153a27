//! Post storage. The service only sees the [`PostStore`] trait; each call is a single
//! independent statement with no transaction spanning calls.

mod memory;
mod postgres;

pub use crate::error::StoreError;
pub use memory::MemoryPostStore;
pub use postgres::{PgPostStore, POSTS_TABLE};

use crate::model::{BlogPost, NewPost, PostChanges};
use async_trait::async_trait;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts in whatever order the store returns them.
    async fn list_all(&self) -> Result<Vec<BlogPost>, StoreError>;

    /// One post by id token. `StoreError::NotFound` when no row matches.
    async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError>;

    /// Insert a row and return the assigned id.
    async fn insert(&self, post: &NewPost) -> Result<i64, StoreError>;

    /// Overwrite the mutable columns of one row. Unconditional; no version check.
    async fn update_fields(&self, id: i64, changes: &PostChanges) -> Result<(), StoreError>;

    /// Delete by id token and return the number of rows removed.
    async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError>;

    /// Connectivity check.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Id tokens come verbatim from the request path. A token that is not an integer can
/// never match a row. Surrounding whitespace and a leading `+` are accepted, as
/// PostgreSQL's integer input does.
pub(crate) fn parse_id(id: &str) -> Option<i64> {
    id.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_id;

    #[test]
    fn parse_id_accepts_integer_forms() {
        assert_eq!(parse_id("1"), Some(1));
        assert_eq!(parse_id("+1"), Some(1));
        assert_eq!(parse_id(" 1"), Some(1));
        assert_eq!(parse_id("1 "), Some(1));
        assert_eq!(parse_id("-3"), Some(-3));
    }

    #[test]
    fn parse_id_rejects_non_integers() {
        assert_eq!(parse_id(""), None);
        assert_eq!(parse_id("   "), None);
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("1.5"), None);
        assert_eq!(parse_id("0x10"), None);
        // One past i64::MAX.
        assert_eq!(parse_id("9223372036854775808"), None);
    }
}
