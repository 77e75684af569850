use uuid::Uuid;

use crate::domain::{CommentContent, parse_id};

#[derive(Debug)]
pub struct NewComment {
    pub content: CommentContent,
    pub post_id: Uuid,
}

impl NewComment {
    pub fn new(content: Option<String>, post_id: Option<String>) -> Result<Self, String> {
        Ok(Self {
            content: CommentContent::parse(content)?,
            post_id: parse_id("postId", post_id.as_deref())?,
        })
    }
}
