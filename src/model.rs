//! Blog post records and the request/response shapes built from them.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted blog post, one row of `blog_posts`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct BlogPost {
    #[schema(example = 1)]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for create and update. Any subset of fields may be sent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct BlogPostInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub body: Option<String>,
}

/// Row handed to the store on insert; the store assigns the id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub description: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Full set of mutable columns written by an update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PostChanges {
    pub title: String,
    pub description: String,
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    #[schema(example = "Post deleted")]
    pub message: String,
}

/// Body of every error response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = "Post not found")]
    pub error: String,
}

/// Current time at the precision PostgreSQL `timestamptz` keeps (microseconds).
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Take the input value only when it is present and non-empty.
fn merge_field(current: &mut String, incoming: &Option<String>) {
    if let Some(value) = incoming.as_deref().filter(|v| !v.is_empty()) {
        *current = value.to_string();
    }
}

impl BlogPostInput {
    /// Build the insert row. Missing fields are stored as empty strings.
    pub fn into_new_post(self, at: DateTime<Utc>) -> NewPost {
        NewPost {
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            body: self.body.unwrap_or_default(),
            created_at: at,
            updated_at: at,
        }
    }
}

impl NewPost {
    pub fn with_id(self, id: i64) -> BlogPost {
        BlogPost {
            id,
            title: self.title,
            description: self.description,
            body: self.body,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl BlogPost {
    /// Merge an update payload into this post. Empty or absent input fields keep the
    /// stored value; `id` and `created_at` never change.
    pub fn apply(&mut self, input: &BlogPostInput, updated_at: DateTime<Utc>) {
        merge_field(&mut self.title, &input.title);
        merge_field(&mut self.description, &input.description);
        merge_field(&mut self.body, &input.body);
        self.updated_at = updated_at;
    }

    pub fn changes(&self) -> PostChanges {
        PostChanges {
            title: self.title.clone(),
            description: self.description.clone(),
            body: self.body.clone(),
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn post() -> BlogPost {
        let at = now();
        BlogPost {
            id: 7,
            title: "old".into(),
            description: "desc".into(),
            body: "text".into(),
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn apply_replaces_only_non_empty_fields() {
        let mut p = post();
        let later = p.created_at + Duration::seconds(1);
        let input = BlogPostInput {
            title: Some("X".into()),
            description: Some(String::new()),
            body: None,
        };
        p.apply(&input, later);
        assert_eq!(p.title, "X");
        assert_eq!(p.description, "desc");
        assert_eq!(p.body, "text");
        assert_eq!(p.id, 7);
        assert_eq!(p.updated_at, later);
        assert!(p.updated_at > p.created_at);
    }

    #[test]
    fn apply_empty_input_only_moves_updated_at() {
        let original = post();
        let mut p = original.clone();
        let later = p.created_at + Duration::milliseconds(5);
        p.apply(&BlogPostInput::default(), later);
        assert_eq!(p.title, original.title);
        assert_eq!(p.description, original.description);
        assert_eq!(p.body, original.body);
        assert_eq!(p.created_at, original.created_at);
        assert_eq!(p.updated_at, later);
    }

    #[test]
    fn input_accepts_partial_and_null_fields() {
        let input: BlogPostInput =
            serde_json::from_str(r#"{"title":"A","body":null,"extra":1}"#).unwrap();
        assert_eq!(input.title.as_deref(), Some("A"));
        assert_eq!(input.description, None);
        assert_eq!(input.body, None);
    }

    #[test]
    fn into_new_post_uses_one_timestamp_and_blank_defaults() {
        let at = now();
        let row = BlogPostInput::default().into_new_post(at);
        assert_eq!(row.title, "");
        assert_eq!(row.created_at, row.updated_at);
    }

    #[test]
    fn serialized_field_names() {
        let v = serde_json::to_value(post()).unwrap();
        let mut keys: Vec<_> = v.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["body", "created_at", "description", "id", "title", "updated_at"]
        );
    }
}
