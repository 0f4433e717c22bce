mod middleware;
mod posts;
mod public;

pub use public::{HttpState, build_router};

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::error::{ErrorReport, HttpError};
use crate::application::posts::PostServiceError;
use crate::application::repos::RepoError;

fn db_health_response(result: Result<(), PostServiceError>) -> Response {
    match result {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            let mut response = StatusCode::SERVICE_UNAVAILABLE.into_response();
            ErrorReport::from_error(
                "infra::http::db_health",
                StatusCode::SERVICE_UNAVAILABLE,
                &err,
            )
            .attach(&mut response);
            response
        }
    }
}

/// Map a repository error to a consistent HTTP error.
pub fn repo_error_to_http(source: &'static str, err: RepoError) -> HttpError {
    match err {
        RepoError::Duplicate { constraint } => {
            HttpError::new(source, StatusCode::CONFLICT, "Duplicate record", constraint)
        }
        RepoError::NotFound => HttpError::new(
            source,
            StatusCode::NOT_FOUND,
            "Resource not found",
            "resource not found",
        ),
        RepoError::Timeout => HttpError::new(
            source,
            StatusCode::SERVICE_UNAVAILABLE,
            "Service temporarily unavailable",
            "Database timeout",
        ),
        RepoError::Persistence(message) => HttpError::new(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error",
            message,
        ),
    }
}

pub fn post_error_to_http(source: &'static str, err: PostServiceError) -> HttpError {
    match err {
        PostServiceError::DuplicateTitle { .. } => HttpError::from_error(
            source,
            StatusCode::CONFLICT,
            "A post with this title already exists",
            &err,
        ),
        PostServiceError::NotFound { .. } => {
            HttpError::from_error(source, StatusCode::NOT_FOUND, "Post not found", &err)
        }
        PostServiceError::Repo(err) => repo_error_to_http(source, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_faults_map_to_server_errors() {
        let err = repo_error_to_http("test", RepoError::Persistence("boom".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "Internal server error");

        let err = repo_error_to_http("test", RepoError::Timeout);
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn post_errors_keep_their_meaning() {
        let duplicate = post_error_to_http(
            "test",
            PostServiceError::DuplicateTitle {
                title: "Hello".into(),
            },
        );
        assert_eq!(duplicate.status(), StatusCode::CONFLICT);

        let missing = post_error_to_http("test", PostServiceError::NotFound { id: 9 });
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
        assert_eq!(missing.into_report().messages, vec!["post 9 not found".to_string()]);
    }

    #[test]
    fn failed_health_probe_is_unavailable() {
        let response = db_health_response(Err(PostServiceError::Repo(RepoError::Timeout)));
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(response.extensions().get::<ErrorReport>().is_some());

        let response = db_health_response(Ok(()));
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
    }
}
