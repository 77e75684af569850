use std::fmt::{self, Debug, Formatter};

use actix_web::{HttpResponse, ResponseError, http::StatusCode, web};
use serde::Deserialize;

use crate::{
    authentication::UserId,
    domain::{CommentContent, CreateCommentPayload, NewComment, UpdateCommentPayload, parse_id},
    repository::CommentStore,
    utils,
};

#[derive(thiserror::Error)]
pub enum CommentError {
    #[error("{0}")]
    ValidationError(String),

    #[error("comment not found")]
    NotFound,

    #[error("not authorized to perform this action")]
    Forbidden,

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for CommentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        utils::error_chain_fmt(self, f)
    }
}

impl ResponseError for CommentError {
    fn status_code(&self) -> StatusCode {
        match self {
            CommentError::ValidationError(_) | CommentError::Conflict(_) => StatusCode::BAD_REQUEST,
            CommentError::NotFound => StatusCode::NOT_FOUND,
            CommentError::Forbidden => StatusCode::FORBIDDEN,
            CommentError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            // the cause chain goes to the logs, not to the caller
            CommentError::UnexpectedError(_) => "Internal server error".to_string(),
            other => other.to_string(),
        };

        utils::build_error_response(self.status_code(), message)
    }
}

#[derive(Deserialize, Debug)]
pub struct CommentPathParams {
    pub comment_id: String,
}

impl CommentPathParams {
    pub fn parse(&self) -> Result<uuid::Uuid, CommentError> {
        parse_id("commentId", Some(&self.comment_id)).map_err(CommentError::ValidationError)
    }
}

#[derive(Deserialize, Debug)]
pub struct PostPathParams {
    pub post_id: String,
}

#[derive(Deserialize, Debug)]
pub struct UserPathParams {
    pub user_id: String,
}

#[tracing::instrument(skip_all, fields(user_id=%&*user_id))]
pub async fn create_comment(
    payload: web::Json<CreateCommentPayload>,
    store: web::Data<dyn CommentStore>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let user_id = user_id.into_inner();

    let comment: NewComment = payload
        .into_inner()
        .try_into()
        .map_err(CommentError::ValidationError)?;

    let created = store.insert_comment(&comment, *user_id).await?;

    Ok(HttpResponse::Created().json(created))
}

#[tracing::instrument(skip_all, fields(post_id=%path.post_id))]
pub async fn show_comments_for_post(
    path: web::Path<PostPathParams>,
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let post_id =
        parse_id("postId", Some(&path.post_id)).map_err(CommentError::ValidationError)?;

    let comments = store.get_comments_for_post(post_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

#[tracing::instrument(skip_all, fields(comment_id=%path.comment_id))]
pub async fn show_comment(
    path: web::Path<CommentPathParams>,
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let comment_id = path.parse()?;

    let comment = store
        .get_comment(comment_id)
        .await?
        .ok_or(CommentError::NotFound)?;

    Ok(HttpResponse::Ok().json(comment))
}

#[tracing::instrument(skip_all, fields(user_id=%path.user_id))]
pub async fn show_comments_for_user(
    path: web::Path<UserPathParams>,
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let user_id =
        parse_id("userId", Some(&path.user_id)).map_err(CommentError::ValidationError)?;

    let comments = store.get_comments_for_user(user_id).await?;

    Ok(HttpResponse::Ok().json(comments))
}

#[tracing::instrument(skip_all, fields(comment_id=%path.comment_id, user_id=%&*user_id))]
pub async fn update_comment(
    path: web::Path<CommentPathParams>,
    payload: web::Json<UpdateCommentPayload>,
    store: web::Data<dyn CommentStore>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let comment_id = path.parse()?;
    let content = CommentContent::parse(payload.into_inner().content)
        .map_err(CommentError::ValidationError)?;
    let user_id = user_id.into_inner();

    verify_ownership(comment_id, user_id, store.get_ref()).await?;

    // A concurrent delete between the ownership check and here surfaces as not found
    let updated = store
        .update_comment_content(comment_id, *user_id, &content)
        .await?
        .ok_or(CommentError::NotFound)?;

    Ok(HttpResponse::Ok().json(updated))
}

#[tracing::instrument(skip_all, fields(comment_id=%path.comment_id, user_id=%&*user_id))]
pub async fn delete_comment(
    path: web::Path<CommentPathParams>,
    store: web::Data<dyn CommentStore>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let comment_id = path.parse()?;
    let user_id = user_id.into_inner();

    verify_ownership(comment_id, user_id, store.get_ref()).await?;

    if !store.delete_comment(comment_id, *user_id).await? {
        return Err(CommentError::NotFound);
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Comment deleted successfully" })))
}

async fn verify_ownership(
    comment_id: uuid::Uuid,
    user_id: UserId,
    store: &dyn CommentStore,
) -> Result<(), CommentError> {
    let owner = store
        .get_comment_owner(comment_id)
        .await?
        .ok_or(CommentError::NotFound)?;

    if owner != *user_id {
        tracing::warn!(%owner, "Caller is not the owner of the comment");
        return Err(CommentError::Forbidden);
    }

    Ok(())
}
