use actix_web::{HttpRequest, HttpResponse, error::InternalError, http::StatusCode, web};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn build_error_response(status_code: StatusCode, message: impl Into<String>) -> HttpResponse {
    let error_response = ErrorResponse {
        error: message.into(),
    };
    HttpResponse::build(status_code).json(error_response)
}

pub fn error_chain_fmt(
    e: &dyn std::error::Error,
    f: &mut std::fmt::Formatter<'_>,
) -> std::fmt::Result {
    writeln!(f, "{e}")?;

    let mut current = e.source();
    while let Some(cause) = current {
        // For causes: use Debug if caller asked for `:#?` (`tracing::debug!("{:#?}", err)`), else Display (`tracing::error!("{:?}", err)`)
        if f.alternate() {
            writeln!(f, "Caused by:\n\t{cause:?}")?;
        } else {
            writeln!(f, "Caused by:\n\t{cause}")?;
        }
        current = cause.source();
    }
    Ok(())
}

// Keeps the root cause for the logs, answers with a generic body
pub fn e500<T>(e: T) -> actix_web::Error
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
    InternalError::from_response(e, response).into()
}

pub fn e400<T>(e: T) -> actix_web::Error
where
    T: std::fmt::Debug + std::fmt::Display + 'static,
{
    let response = build_error_response(StatusCode::BAD_REQUEST, e.to_string());
    InternalError::from_response(e, response).into()
}

/// Malformed JSON bodies get the same `{ "error": .. }` shape as our own errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| e400(err))
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| e400(err))
}
