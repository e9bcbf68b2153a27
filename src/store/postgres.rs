//! PostgreSQL post store over a `PgPool`.

use super::{parse_id, PostStore};
use crate::config::DatabaseConfig;
use crate::error::StoreError;
use crate::model::{BlogPost, NewPost, PostChanges};
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub const POSTS_TABLE: &str = "blog_posts";

// Casts let the table use either SERIAL/BIGSERIAL ids and TIMESTAMP/TIMESTAMPTZ columns.
const SELECT_COLUMNS: &str = "id::BIGINT AS id, title, description, body, \
     created_at::TIMESTAMPTZ AS created_at, updated_at::TIMESTAMPTZ AS updated_at";

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open the pool and verify the database answers.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;
        let store = Self::new(pool);
        store.ping().await?;
        Ok(store)
    }

    /// Wait for checked-out connections to return, then close the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl PostStore for PgPostStore {
    async fn list_all(&self) -> Result<Vec<BlogPost>, StoreError> {
        let sql = format!("SELECT {} FROM {}", SELECT_COLUMNS, POSTS_TABLE);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, BlogPost>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: &str) -> Result<BlogPost, StoreError> {
        let id = parse_id(id).ok_or(StoreError::NotFound)?;
        let sql = format!("SELECT {} FROM {} WHERE id = $1", SELECT_COLUMNS, POSTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query_as::<_, BlogPost>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn insert(&self, post: &NewPost) -> Result<i64, StoreError> {
        let sql = format!(
            "INSERT INTO {} (title, description, body, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5) RETURNING id::BIGINT",
            POSTS_TABLE
        );
        tracing::debug!(sql = %sql, "query");
        let (id,): (i64,) = sqlx::query_as(&sql)
            .bind(&post.title)
            .bind(&post.description)
            .bind(&post.body)
            .bind(post.created_at)
            .bind(post.updated_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn update_fields(&self, id: i64, changes: &PostChanges) -> Result<(), StoreError> {
        let sql = format!(
            "UPDATE {} SET title = $1, description = $2, body = $3, updated_at = $4 WHERE id = $5",
            POSTS_TABLE
        );
        tracing::debug!(sql = %sql, id, "query");
        sqlx::query(&sql)
            .bind(&changes.title)
            .bind(&changes.description)
            .bind(&changes.body)
            .bind(changes.updated_at)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };
        let sql = format!("DELETE FROM {} WHERE id = $1", POSTS_TABLE);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
