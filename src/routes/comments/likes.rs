use actix_web::{HttpResponse, web};

use crate::{
    authentication::UserId,
    repository::{CommentStore, LikeOutcome},
    routes::{CommentError, CommentPathParams},
};

#[tracing::instrument(skip_all, fields(comment_id=%path.comment_id, user_id=%&*user_id))]
pub async fn like_comment(
    path: web::Path<CommentPathParams>,
    store: web::Data<dyn CommentStore>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let comment_id = path.parse()?;
    let user_id = user_id.into_inner();

    match store.add_like(comment_id, *user_id).await? {
        LikeOutcome::Applied(comment) => Ok(HttpResponse::Ok().json(comment)),
        LikeOutcome::Unchanged => Err(CommentError::Conflict(
            "You have already liked this comment".to_string(),
        )),
        LikeOutcome::Missing => Err(CommentError::NotFound),
    }
}

#[tracing::instrument(skip_all, fields(comment_id=%path.comment_id, user_id=%&*user_id))]
pub async fn unlike_comment(
    path: web::Path<CommentPathParams>,
    store: web::Data<dyn CommentStore>,
    user_id: web::ReqData<UserId>,
) -> Result<HttpResponse, CommentError> {
    let comment_id = path.parse()?;
    let user_id = user_id.into_inner();

    match store.remove_like(comment_id, *user_id).await? {
        LikeOutcome::Applied(comment) => Ok(HttpResponse::Ok().json(comment)),
        LikeOutcome::Unchanged => Err(CommentError::Conflict(
            "You have not liked this comment yet".to_string(),
        )),
        LikeOutcome::Missing => Err(CommentError::NotFound),
    }
}
