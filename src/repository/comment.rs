use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::Span;
use uuid::Uuid;

use crate::{
    domain::{
        CommentAuthorRecord, CommentContent, CommentPostRecord, CommentRecord, CommentResponse,
        CommentWithAuthor, CommentWithPost, NewComment, Pagination, SearchTerm,
    },
    repository::{CommentStore, LikeOutcome},
};

const COMMENT_COLUMNS: &str = "id, content, post_id, user_id, likes, created_at";

/// `CommentStore` backed by the `comments` table. Author names and post
/// titles are joined from `users` and `posts`.
#[derive(Clone, Debug)]
pub struct PgCommentStore {
    pool: PgPool,
}

impl PgCommentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn comment_exists(&self, id: Uuid) -> Result<bool, anyhow::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM comments WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .context("Failed to check if comment exists")
    }

    async fn like_outcome(
        &self,
        id: Uuid,
        updated: Option<CommentRecord>,
    ) -> Result<LikeOutcome, anyhow::Error> {
        if let Some(record) = updated {
            return Ok(LikeOutcome::Applied(record.into()));
        }

        if self.comment_exists(id).await? {
            Ok(LikeOutcome::Unchanged)
        } else {
            Ok(LikeOutcome::Missing)
        }
    }
}

#[async_trait]
impl CommentStore for PgCommentStore {
    #[tracing::instrument(
        skip_all,
        fields(post_id=%comment.post_id, comment_id=tracing::field::Empty)
    )]
    async fn insert_comment(
        &self,
        comment: &NewComment,
        user_id: Uuid,
    ) -> Result<CommentResponse, anyhow::Error> {
        let record = sqlx::query_as::<_, CommentRecord>(&format!(
            r#"
            INSERT INTO comments (id, content, post_id, user_id)
            VALUES ($1, $2, $3, $4)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(comment.content.as_ref())
        .bind(comment.post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .context("Failed to insert comment")?;

        Span::current().record("comment_id", tracing::field::display(&record.id));
        Ok(record.into())
    }

    #[tracing::instrument(skip(self))]
    async fn get_comments_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, anyhow::Error> {
        let rows = sqlx::query_as::<_, CommentAuthorRecord>(
            r#"
            SELECT c.id, c.content, c.post_id, c.user_id, c.likes, c.created_at,
                   u.user_name AS user_name
            FROM comments c
            LEFT JOIN users u ON c.user_id = u.id
            WHERE c.post_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load comments for post")?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_comment(&self, id: Uuid) -> Result<Option<CommentWithAuthor>, anyhow::Error> {
        let row = sqlx::query_as::<_, CommentAuthorRecord>(
            r#"
            SELECT c.id, c.content, c.post_id, c.user_id, c.likes, c.created_at,
                   u.user_name AS user_name
            FROM comments c
            LEFT JOIN users u ON c.user_id = u.id
            WHERE c.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load comment")?;

        Ok(row.map(CommentWithAuthor::from))
    }

    #[tracing::instrument(skip(self))]
    async fn get_comments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CommentWithPost>, anyhow::Error> {
        let rows = sqlx::query_as::<_, CommentPostRecord>(
            r#"
            SELECT c.id, c.content, c.post_id, c.user_id, c.likes, c.created_at,
                   p.title AS post_title
            FROM comments c
            LEFT JOIN posts p ON c.post_id = p.id
            WHERE c.user_id = $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("Failed to load comments for user")?;

        Ok(rows.into_iter().map(CommentWithPost::from).collect())
    }

    #[tracing::instrument(
        skip_all,
        fields(page=%pagination.page.value(), limit=%pagination.limit.value())
    )]
    async fn get_comments_page(
        &self,
        pagination: &Pagination,
    ) -> Result<(Vec<CommentWithAuthor>, i64), anyhow::Error> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count comments")?;

        let rows = sqlx::query_as::<_, CommentAuthorRecord>(
            r#"
            SELECT c.id, c.content, c.post_id, c.user_id, c.likes, c.created_at,
                   u.user_name AS user_name
            FROM comments c
            LEFT JOIN users u ON c.user_id = u.id
            ORDER BY c.created_at DESC, c.id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(pagination.limit.value() as i64)
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .context("Failed to load page of comments")?;

        Ok((rows.into_iter().map(CommentWithAuthor::from).collect(), total))
    }

    #[tracing::instrument(skip_all, fields(term=%term.as_ref()))]
    async fn search_comments(
        &self,
        term: &SearchTerm,
    ) -> Result<Vec<CommentWithAuthor>, anyhow::Error> {
        let rows = sqlx::query_as::<_, CommentAuthorRecord>(
            r#"
            SELECT c.id, c.content, c.post_id, c.user_id, c.likes, c.created_at,
                   u.user_name AS user_name
            FROM comments c
            LEFT JOIN users u ON c.user_id = u.id
            WHERE c.content ILIKE $1
            ORDER BY c.created_at DESC, c.id DESC
            "#,
        )
        .bind(term.like_pattern())
        .fetch_all(&self.pool)
        .await
        .context("Failed to search comments")?;

        Ok(rows.into_iter().map(CommentWithAuthor::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn get_comment_owner(&self, id: Uuid) -> Result<Option<Uuid>, anyhow::Error> {
        sqlx::query_scalar::<_, Uuid>("SELECT user_id FROM comments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .context("Failed to load comment owner")
    }

    #[tracing::instrument(skip(self, content))]
    async fn update_comment_content(
        &self,
        id: Uuid,
        user_id: Uuid,
        content: &CommentContent,
    ) -> Result<Option<CommentResponse>, anyhow::Error> {
        let record = sqlx::query_as::<_, CommentRecord>(&format!(
            r#"
            UPDATE comments
            SET content = $1
            WHERE id = $2 AND user_id = $3
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(content.as_ref())
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to update comment")?;

        Ok(record.map(CommentResponse::from))
    }

    #[tracing::instrument(skip(self))]
    async fn delete_comment(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .context("Failed to delete comment")?;

        Ok(result.rows_affected() > 0)
    }

    #[tracing::instrument(skip(self))]
    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<LikeOutcome, anyhow::Error> {
        // Membership is checked in the same statement that appends.
        let updated = sqlx::query_as::<_, CommentRecord>(&format!(
            r#"
            UPDATE comments
            SET likes = array_append(likes, $1)
            WHERE id = $2 AND NOT ($1 = ANY(likes))
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to add like to comment")?;

        self.like_outcome(id, updated).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> Result<LikeOutcome, anyhow::Error> {
        let updated = sqlx::query_as::<_, CommentRecord>(&format!(
            r#"
            UPDATE comments
            SET likes = array_remove(likes, $1)
            WHERE id = $2 AND $1 = ANY(likes)
            RETURNING {COMMENT_COLUMNS}
            "#
        ))
        .bind(user_id)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to remove like from comment")?;

        self.like_outcome(id, updated).await
    }
}
