mod comment;
mod in_memory;

pub use comment::*;
pub use in_memory::*;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    CommentContent, CommentResponse, CommentWithAuthor, CommentWithPost, NewComment, Pagination,
    SearchTerm,
};

/// Result of a conditional add-to-set / remove-from-set on a comment's likes.
#[derive(Debug, PartialEq)]
pub enum LikeOutcome {
    /// The set changed; carries the comment as it is after the change.
    Applied(CommentResponse),
    /// The comment exists but the set already was in the requested state.
    Unchanged,
    /// No comment with that id.
    Missing,
}

/// Persistence boundary for comments.
///
/// Every mutation is a single conditional statement so that concurrent
/// requests cannot break the ownership or unique-like invariants.
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert_comment(
        &self,
        comment: &NewComment,
        user_id: Uuid,
    ) -> Result<CommentResponse, anyhow::Error>;

    /// Newest first.
    async fn get_comments_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, anyhow::Error>;

    async fn get_comment(&self, id: Uuid) -> Result<Option<CommentWithAuthor>, anyhow::Error>;

    /// Newest first.
    async fn get_comments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CommentWithPost>, anyhow::Error>;

    /// One page of all comments, newest first, together with the total count.
    async fn get_comments_page(
        &self,
        pagination: &Pagination,
    ) -> Result<(Vec<CommentWithAuthor>, i64), anyhow::Error>;

    /// Newest first.
    async fn search_comments(
        &self,
        term: &SearchTerm,
    ) -> Result<Vec<CommentWithAuthor>, anyhow::Error>;

    async fn get_comment_owner(&self, id: Uuid) -> Result<Option<Uuid>, anyhow::Error>;

    /// Returns `None` when no comment with `id` is owned by `user_id`.
    async fn update_comment_content(
        &self,
        id: Uuid,
        user_id: Uuid,
        content: &CommentContent,
    ) -> Result<Option<CommentResponse>, anyhow::Error>;

    /// Returns `false` when no comment with `id` is owned by `user_id`.
    async fn delete_comment(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error>;

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<LikeOutcome, anyhow::Error>;

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> Result<LikeOutcome, anyhow::Error>;
}
