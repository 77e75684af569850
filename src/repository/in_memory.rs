use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    domain::{
        AuthorRef, CommentContent, CommentResponse, CommentWithAuthor, CommentWithPost,
        NewComment, Pagination, PostRef, SearchTerm,
    },
    repository::{CommentStore, LikeOutcome},
};

/// `CommentStore` held in process memory.
///
/// User names and post titles have to be registered up front for the joined
/// views to show them, the same way the `users` and `posts` tables are owned
/// by other services in production.
#[derive(Default)]
pub struct InMemoryCommentStore {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    comments: Vec<StoredComment>,
    next_seq: u64,
    user_names: HashMap<Uuid, String>,
    post_titles: HashMap<Uuid, String>,
}

#[derive(Clone)]
struct StoredComment {
    seq: u64,
    id: Uuid,
    content: String,
    post_id: Uuid,
    user_id: Uuid,
    likes: Vec<Uuid>,
    created_at: DateTime<Utc>,
}

impl StoredComment {
    fn to_response(&self) -> CommentResponse {
        CommentResponse {
            id: self.id,
            content: self.content.clone(),
            post: self.post_id,
            user: self.user_id,
            likes: self.likes.clone(),
            created_at: self.created_at,
        }
    }
}

impl State {
    fn find_mut(&mut self, id: Uuid) -> Option<&mut StoredComment> {
        self.comments.iter_mut().find(|c| c.id == id)
    }

    fn with_author(&self, comment: &StoredComment) -> CommentWithAuthor {
        CommentWithAuthor {
            id: comment.id,
            content: comment.content.clone(),
            post: comment.post_id,
            user: AuthorRef {
                id: comment.user_id,
                username: self.user_names.get(&comment.user_id).cloned(),
            },
            likes: comment.likes.clone(),
            created_at: comment.created_at,
        }
    }

    fn with_post(&self, comment: &StoredComment) -> CommentWithPost {
        CommentWithPost {
            id: comment.id,
            content: comment.content.clone(),
            post: PostRef {
                id: comment.post_id,
                title: self.post_titles.get(&comment.post_id).cloned(),
            },
            user: comment.user_id,
            likes: comment.likes.clone(),
            created_at: comment.created_at,
        }
    }

    // Newest first; insertion order breaks timestamp ties.
    fn newest_first<'a>(
        &'a self,
        filter: impl Fn(&StoredComment) -> bool,
    ) -> Vec<&'a StoredComment> {
        let mut comments: Vec<_> = self.comments.iter().filter(|c| filter(c)).collect();
        comments.sort_by(|a, b| (b.created_at, b.seq).cmp(&(a.created_at, a.seq)));
        comments
    }
}

impl InMemoryCommentStore {
    pub async fn register_user(&self, id: Uuid, user_name: &str) {
        self.state
            .write()
            .await
            .user_names
            .insert(id, user_name.to_string());
    }

    pub async fn register_post(&self, id: Uuid, title: &str) {
        self.state
            .write()
            .await
            .post_titles
            .insert(id, title.to_string());
    }

    pub async fn comment_count(&self) -> usize {
        self.state.read().await.comments.len()
    }
}

#[async_trait]
impl CommentStore for InMemoryCommentStore {
    async fn insert_comment(
        &self,
        comment: &NewComment,
        user_id: Uuid,
    ) -> Result<CommentResponse, anyhow::Error> {
        let mut state = self.state.write().await;
        let seq = state.next_seq;
        state.next_seq += 1;

        let stored = StoredComment {
            seq,
            id: Uuid::new_v4(),
            content: comment.content.as_ref().to_string(),
            post_id: comment.post_id,
            user_id,
            likes: Vec::new(),
            created_at: Utc::now(),
        };
        let response = stored.to_response();
        state.comments.push(stored);

        Ok(response)
    }

    async fn get_comments_for_post(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .newest_first(|c| c.post_id == post_id)
            .into_iter()
            .map(|c| state.with_author(c))
            .collect())
    }

    async fn get_comment(&self, id: Uuid) -> Result<Option<CommentWithAuthor>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .find(|c| c.id == id)
            .map(|c| state.with_author(c)))
    }

    async fn get_comments_for_user(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<CommentWithPost>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .newest_first(|c| c.user_id == user_id)
            .into_iter()
            .map(|c| state.with_post(c))
            .collect())
    }

    async fn get_comments_page(
        &self,
        pagination: &Pagination,
    ) -> Result<(Vec<CommentWithAuthor>, i64), anyhow::Error> {
        let state = self.state.read().await;
        let all = state.newest_first(|_| true);
        let total = all.len() as i64;

        let page = all
            .into_iter()
            .skip(pagination.offset() as usize)
            .take(pagination.limit.value() as usize)
            .map(|c| state.with_author(c))
            .collect();

        Ok((page, total))
    }

    async fn search_comments(
        &self,
        term: &SearchTerm,
    ) -> Result<Vec<CommentWithAuthor>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .newest_first(|c| term.matches(&c.content))
            .into_iter()
            .map(|c| state.with_author(c))
            .collect())
    }

    async fn get_comment_owner(&self, id: Uuid) -> Result<Option<Uuid>, anyhow::Error> {
        let state = self.state.read().await;
        Ok(state
            .comments
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.user_id))
    }

    async fn update_comment_content(
        &self,
        id: Uuid,
        user_id: Uuid,
        content: &CommentContent,
    ) -> Result<Option<CommentResponse>, anyhow::Error> {
        let mut state = self.state.write().await;
        Ok(state
            .find_mut(id)
            .filter(|c| c.user_id == user_id)
            .map(|c| {
                c.content = content.as_ref().to_string();
                c.to_response()
            }))
    }

    async fn delete_comment(&self, id: Uuid, user_id: Uuid) -> Result<bool, anyhow::Error> {
        let mut state = self.state.write().await;
        let before = state.comments.len();
        state
            .comments
            .retain(|c| !(c.id == id && c.user_id == user_id));
        Ok(state.comments.len() < before)
    }

    async fn add_like(&self, id: Uuid, user_id: Uuid) -> Result<LikeOutcome, anyhow::Error> {
        let mut state = self.state.write().await;
        Ok(match state.find_mut(id) {
            None => LikeOutcome::Missing,
            Some(c) if c.likes.contains(&user_id) => LikeOutcome::Unchanged,
            Some(c) => {
                c.likes.push(user_id);
                LikeOutcome::Applied(c.to_response())
            }
        })
    }

    async fn remove_like(&self, id: Uuid, user_id: Uuid) -> Result<LikeOutcome, anyhow::Error> {
        let mut state = self.state.write().await;
        Ok(match state.find_mut(id) {
            None => LikeOutcome::Missing,
            Some(c) if !c.likes.contains(&user_id) => LikeOutcome::Unchanged,
            Some(c) => {
                c.likes.retain(|liker| *liker != user_id);
                LikeOutcome::Applied(c.to_response())
            }
        })
    }
}
