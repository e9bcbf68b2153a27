//! Blog post operations: validation, merge and mapping of store results to outcomes.

use crate::error::{AppError, StoreError};
use crate::model::{now, BlogPost, BlogPostInput, DeleteResponse};
use crate::response::PostOutcome;
use crate::store::PostStore;
use std::sync::Arc;

pub const MSG_FETCH_POSTS_FAILED: &str = "Failed to fetch posts";
pub const MSG_PARSE_POST_FAILED: &str = "Failed to parse post";
pub const MSG_NOT_FOUND: &str = "Post not found";
pub const MSG_FETCH_POST_FAILED: &str = "Failed to fetch post";
pub const MSG_INVALID_INPUT: &str = "Invalid input";
pub const MSG_CREATE_FAILED: &str = "Failed to create post";
pub const MSG_ID_REQUIRED: &str = "ID is required";
pub const MSG_RETRIEVE_FAILED: &str = "Failed to retrieve post";
pub const MSG_UPDATE_FAILED: &str = "Failed to update post";
pub const MSG_DELETE_FAILED: &str = "Failed to delete post";
pub const MSG_DELETED: &str = "Post deleted";

/// Stateless per request; clones share the injected store.
#[derive(Clone)]
pub struct PostService {
    store: Arc<dyn PostStore>,
}

/// Bodies are parsed as JSON whatever the `Content-Type`; form-encoded bodies are rejected.
fn parse_input(body: &[u8]) -> Result<BlogPostInput, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::warn!(error = %e, "invalid blog post body");
        AppError::BadRequest(MSG_INVALID_INPUT)
    })
}

/// Fetch one post, mapping a missing row to `NotFound` and anything else to a
/// store failure with `failure_message`.
async fn fetch(
    store: &dyn PostStore,
    id: &str,
    failure_message: &'static str,
) -> Result<BlogPost, AppError> {
    store.get_by_id(id).await.map_err(|e| match e {
        StoreError::NotFound => AppError::NotFound(MSG_NOT_FOUND),
        other => AppError::store(failure_message, other),
    })
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn PostStore {
        self.store.as_ref()
    }

    pub async fn list(&self) -> Result<PostOutcome, AppError> {
        let posts = self.store.list_all().await.map_err(|e| {
            let message = if e.is_decode() {
                MSG_PARSE_POST_FAILED
            } else {
                MSG_FETCH_POSTS_FAILED
            };
            AppError::store(message, e)
        })?;
        Ok(PostOutcome::Listed(posts))
    }

    /// `id` is passed to the store as-is; unknown or malformed ids come back as `NotFound`.
    pub async fn get(&self, id: &str) -> Result<PostOutcome, AppError> {
        let post = fetch(self.store(), id, MSG_FETCH_POST_FAILED).await?;
        Ok(PostOutcome::Found(post))
    }

    /// Create a post. Blank fields are accepted; both timestamps share one capture.
    pub async fn create(&self, body: &[u8]) -> Result<PostOutcome, AppError> {
        let input = parse_input(body)?;
        let row = input.into_new_post(now());
        let id = self
            .store
            .insert(&row)
            .await
            .map_err(|e| AppError::store(MSG_CREATE_FAILED, e))?;
        tracing::info!(id, "blog post created");
        Ok(PostOutcome::Created(row.with_id(id)))
    }

    /// Read, merge and write back. The write is unconditional, so two concurrent
    /// updates to the same id resolve as last-writer-wins. The merged record is
    /// returned without re-reading the row.
    pub async fn update(&self, id: &str, body: &[u8]) -> Result<PostOutcome, AppError> {
        if id.is_empty() {
            return Err(AppError::BadRequest(MSG_ID_REQUIRED));
        }
        let mut post = fetch(self.store(), id, MSG_RETRIEVE_FAILED).await?;
        let input = parse_input(body)?;

        post.apply(&input, now());
        self.store
            .update_fields(post.id, &post.changes())
            .await
            .map_err(|e| AppError::store(MSG_UPDATE_FAILED, e))?;
        tracing::info!(id = post.id, "blog post updated");
        Ok(PostOutcome::Updated(post))
    }

    /// The affected-row count decides whether the id existed.
    pub async fn delete(&self, id: &str) -> Result<PostOutcome, AppError> {
        let affected = self
            .store
            .delete_by_id(id)
            .await
            .map_err(|e| AppError::store(MSG_DELETE_FAILED, e))?;
        if affected == 0 {
            return Err(AppError::NotFound(MSG_NOT_FOUND));
        }
        tracing::info!(id, "blog post deleted");
        Ok(PostOutcome::Deleted(DeleteResponse {
            message: MSG_DELETED.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewPost, PostChanges};
    use crate::store::MemoryPostStore;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Counts every store call and fails all of them except `get_by_id` when told to.
    #[derive(Default)]
    struct ProbeStore {
        calls: AtomicUsize,
        inner: MemoryPostStore,
        fail_writes: bool,
        decode_failure: bool,
    }

    impl ProbeStore {
        fn hit(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }

        fn write_error(&self) -> Result<(), StoreError> {
            if self.fail_writes {
                Err(StoreError::Db(sqlx::Error::PoolTimedOut))
            } else {
                Ok(())
            }
        }
    }

    #[async_trait]
    impl PostStore for ProbeStore {
        async fn list_all(&self) -> Result<Vec<BlogPost>, StoreError> {
            self.hit();
            if self.decode_failure {
                return Err(StoreError::Db(sqlx::Error::ColumnDecode {
                    index: "title".into(),
                    source: "unexpected null".into(),
                }));
            }
            self.write_error()?;
            self.inner.list_all().await
        }

        async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError> {
            self.hit();
            self.inner.get_by_id(id).await
        }

        async fn insert(&self, post: &NewPost) -> Result<i64, StoreError> {
            self.hit();
            self.write_error()?;
            self.inner.insert(post).await
        }

        async fn update_fields(&self, id: i64, changes: &PostChanges) -> Result<(), StoreError> {
            self.hit();
            self.write_error()?;
            self.inner.update_fields(id, changes).await
        }

        async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
            self.hit();
            self.write_error()?;
            self.inner.delete_by_id(id).await
        }

        async fn ping(&self) -> Result<(), StoreError> {
            self.write_error()
        }
    }

    fn service_with(store: Arc<ProbeStore>) -> PostService {
        PostService::new(store)
    }

    async fn seed(store: &ProbeStore, title: &str, description: &str, body: &str) -> BlogPost {
        let row = BlogPostInput {
            title: Some(title.into()),
            description: Some(description.into()),
            body: Some(body.into()),
        }
        .into_new_post(now());
        let id = store.inner.insert(&row).await.unwrap();
        row.with_id(id)
    }

    fn expect_post(outcome: PostOutcome) -> BlogPost {
        match outcome {
            PostOutcome::Found(p) | PostOutcome::Created(p) | PostOutcome::Updated(p) => p,
            other => panic!("expected a single post, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_then_get_returns_same_fields() {
        let service = service_with(Arc::new(ProbeStore::default()));
        let created = expect_post(
            service
                .create(br#"{"title":"A","description":"B","body":"C"}"#)
                .await
                .unwrap(),
        );
        assert_eq!(created.created_at, created.updated_at);

        let fetched = expect_post(service.get(&created.id.to_string()).await.unwrap());
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_accepts_blank_fields() {
        let service = service_with(Arc::new(ProbeStore::default()));
        let created = expect_post(service.create(b"{}").await.unwrap());
        assert_eq!(created.title, "");
        assert_eq!(created.description, "");
        assert_eq!(created.body, "");
    }

    #[tokio::test]
    async fn create_with_bad_body_does_not_touch_store() {
        let store = Arc::new(ProbeStore::default());
        let service = service_with(store.clone());
        let err = service.create(b"{not json").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(MSG_INVALID_INPUT)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_merges_and_advances_updated_at() {
        let store = Arc::new(ProbeStore::default());
        let original = seed(&store, "old", "B", "C").await;
        let service = service_with(store.clone());
        tokio::time::sleep(Duration::from_millis(2)).await;

        let updated = expect_post(
            service
                .update(&original.id.to_string(), br#"{"title":"X"}"#)
                .await
                .unwrap(),
        );
        assert_eq!(updated.title, "X");
        assert_eq!(updated.description, "B");
        assert_eq!(updated.body, "C");
        assert_eq!(updated.created_at, original.created_at);
        assert!(updated.updated_at > original.updated_at);

        let stored = store.inner.get_by_id(&original.id.to_string()).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn update_with_empty_object_changes_only_updated_at() {
        let store = Arc::new(ProbeStore::default());
        let original = seed(&store, "t", "d", "b").await;
        let service = service_with(store);
        tokio::time::sleep(Duration::from_millis(2)).await;

        let updated = expect_post(
            service
                .update(&original.id.to_string(), br#"{"title":"","body":""}"#)
                .await
                .unwrap(),
        );
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.body, original.body);
        assert!(updated.updated_at > original.updated_at);
    }

    #[tokio::test]
    async fn update_without_id_is_rejected_before_store() {
        let store = Arc::new(ProbeStore::default());
        let service = service_with(store.clone());
        let err = service.update("", br#"{"title":"X"}"#).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(MSG_ID_REQUIRED)));
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn update_missing_post_is_not_found_even_with_bad_body() {
        let service = service_with(Arc::new(ProbeStore::default()));
        let err = service.update("42", b"garbage").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(MSG_NOT_FOUND)));
    }

    #[tokio::test]
    async fn update_bad_body_after_fetch_is_bad_request() {
        let store = Arc::new(ProbeStore::default());
        let original = seed(&store, "t", "d", "b").await;
        let service = service_with(store.clone());
        let err = service
            .update(&original.id.to_string(), b"not json")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(MSG_INVALID_INPUT)));
        // Only the fetch reached the store.
        assert_eq!(store.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn update_write_failure_is_store_failure() {
        let store = Arc::new(ProbeStore {
            fail_writes: true,
            ..Default::default()
        });
        let original = seed(&store, "t", "d", "b").await;
        let service = service_with(store);
        let err = service
            .update(&original.id.to_string(), br#"{"title":"X"}"#)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::StoreFailure {
                message: MSG_UPDATE_FAILED,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn delete_uses_affected_rows() {
        let store = Arc::new(ProbeStore::default());
        let original = seed(&store, "t", "d", "b").await;
        let service = service_with(store);
        let id = original.id.to_string();

        match service.delete(&id).await.unwrap() {
            PostOutcome::Deleted(resp) => assert_eq!(resp.message, MSG_DELETED),
            other => panic!("unexpected outcome {:?}", other),
        }
        assert!(matches!(
            service.delete(&id).await.unwrap_err(),
            AppError::NotFound(_)
        ));
        assert!(matches!(service.get(&id).await.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn get_unknown_ids_are_not_found() {
        let service = service_with(Arc::new(ProbeStore::default()));
        for id in ["", "nonexistent", "999"] {
            assert!(matches!(service.get(id).await.unwrap_err(), AppError::NotFound(_)));
        }
    }

    #[tokio::test]
    async fn list_failures_pick_message_by_cause() {
        let service = service_with(Arc::new(ProbeStore {
            fail_writes: true,
            ..Default::default()
        }));
        assert!(matches!(
            service.list().await.unwrap_err(),
            AppError::StoreFailure {
                message: MSG_FETCH_POSTS_FAILED,
                ..
            }
        ));

        let service = service_with(Arc::new(ProbeStore {
            decode_failure: true,
            ..Default::default()
        }));
        assert!(matches!(
            service.list().await.unwrap_err(),
            AppError::StoreFailure {
                message: MSG_PARSE_POST_FAILED,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn create_and_delete_store_failures() {
        let service = service_with(Arc::new(ProbeStore {
            fail_writes: true,
            ..Default::default()
        }));
        assert!(matches!(
            service.create(br#"{"title":"A"}"#).await.unwrap_err(),
            AppError::StoreFailure {
                message: MSG_CREATE_FAILED,
                ..
            }
        ));
        assert!(matches!(
            service.delete("1").await.unwrap_err(),
            AppError::StoreFailure {
                message: MSG_DELETE_FAILED,
                ..
            }
        ));
    }
}
