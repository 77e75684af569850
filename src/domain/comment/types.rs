use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::NewComment;

#[derive(sqlx::FromRow, Debug)]
pub struct CommentRecord {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

// Row shape for queries that join the author's user name
#[derive(sqlx::FromRow, Debug)]
pub struct CommentAuthorRecord {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub user_name: Option<String>,
}

// Row shape for queries that join the post's title
#[derive(sqlx::FromRow, Debug)]
pub struct CommentPostRecord {
    pub id: Uuid,
    pub content: String,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub post_title: Option<String>,
}

/// A comment as stored, with `post` and `user` left as bare ids.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: Uuid,
    pub content: String,
    pub post: Uuid,
    pub user: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRecord> for CommentResponse {
    fn from(record: CommentRecord) -> Self {
        Self {
            id: record.id,
            content: record.content,
            post: record.post_id,
            user: record.user_id,
            likes: record.likes,
            created_at: record.created_at,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct AuthorRef {
    pub id: Uuid,
    pub username: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostRef {
    pub id: Uuid,
    pub title: Option<String>,
}

/// A comment with its author's user name joined in.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub content: String,
    pub post: Uuid,
    pub user: AuthorRef,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CommentAuthorRecord> for CommentWithAuthor {
    fn from(record: CommentAuthorRecord) -> Self {
        Self {
            id: record.id,
            content: record.content,
            post: record.post_id,
            user: AuthorRef {
                id: record.user_id,
                username: record.user_name,
            },
            likes: record.likes,
            created_at: record.created_at,
        }
    }
}

/// A comment with the title of the post it belongs to joined in.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithPost {
    pub id: Uuid,
    pub content: String,
    pub post: PostRef,
    pub user: Uuid,
    pub likes: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl From<CommentPostRecord> for CommentWithPost {
    fn from(record: CommentPostRecord) -> Self {
        Self {
            id: record.id,
            content: record.content,
            post: PostRef {
                id: record.post_id,
                title: record.post_title,
            },
            user: record.user_id,
            likes: record.likes,
            created_at: record.created_at,
        }
    }
}

// Fields are optional so that an absent field reaches our own validation
// instead of failing JSON extraction.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentPayload {
    pub content: Option<String>,
    pub post_id: Option<String>,
}

impl TryFrom<CreateCommentPayload> for NewComment {
    type Error = String;

    fn try_from(value: CreateCommentPayload) -> Result<Self, Self::Error> {
        NewComment::new(value.content, value.post_id)
    }
}

#[derive(Deserialize, Debug)]
pub struct UpdateCommentPayload {
    pub content: Option<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedComments {
    pub comments: Vec<CommentWithAuthor>,
    pub total_pages: i64,
    pub current_page: i32,
}
