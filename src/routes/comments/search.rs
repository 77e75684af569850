use actix_web::{HttpResponse, web};

use crate::{
    domain::{PaginatedComments, Pagination, PaginationQuery, SearchQuery, SearchTerm},
    repository::CommentStore,
    routes::CommentError,
};

#[tracing::instrument(skip_all, fields(page=%query.page, limit=%query.limit))]
pub async fn paginate_comments(
    query: web::Query<PaginationQuery>,
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let pagination: Pagination = query
        .into_inner()
        .try_into()
        .map_err(CommentError::ValidationError)?;

    let (comments, total_records) = store.get_comments_page(&pagination).await?;

    Ok(HttpResponse::Ok().json(PaginatedComments {
        comments,
        total_pages: pagination.total_pages(total_records),
        current_page: pagination.page.value(),
    }))
}

/// Serves both `/search?query=` and `/keyword?keyword=`.
#[tracing::instrument(skip_all, fields(query=tracing::field::Empty))]
pub async fn search_comments(
    query: web::Query<SearchQuery>,
    store: web::Data<dyn CommentStore>,
) -> Result<HttpResponse, CommentError> {
    let term = SearchTerm::parse(query.into_inner().into_term())
        .map_err(CommentError::ValidationError)?;
    tracing::Span::current().record("query", term.as_ref());

    let comments = store.search_comments(&term).await?;

    Ok(HttpResponse::Ok().json(comments))
}
