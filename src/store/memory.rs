//! In-process post store. Used by tests and for running without a database.
//! Data is lost on restart.

use super::{parse_id, PostStore};
use crate::error::StoreError;
use crate::model::{BlogPost, NewPost, PostChanges};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Rows {
    last_id: i64,
    posts: BTreeMap<i64, BlogPost>,
}

/// Posts keyed by id. Ids increase monotonically and are never reused after delete.
#[derive(Default)]
pub struct MemoryPostStore {
    rows: RwLock<Rows>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        let rows = self.rows.read().await;
        Ok(rows.posts.values().cloned().collect())
    }

    async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError> {
        let id = parse_id(id).ok_or(StoreError::NotFound)?;
        let rows = self.rows.read().await;
        rows.posts.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn insert(&self, post: &NewPost) -> Result<i64, StoreError> {
        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let id = rows.last_id;
        rows.posts.insert(id, post.clone().with_id(id));
        Ok(id)
    }

    async fn update_fields(&self, id: i64, changes: &PostChanges) -> Result<(), StoreError> {
        let mut rows = self.rows.write().await;
        // Matches an UPDATE that hits zero rows: not an error.
        if let Some(post) = rows.posts.get_mut(&id) {
            post.title = changes.title.clone();
            post.description = changes.description.clone();
            post.body = changes.body.clone();
            post.updated_at = changes.updated_at;
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };
        let mut rows = self.rows.write().await;
        Ok(rows.posts.remove(&id).map_or(0, |_| 1))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
