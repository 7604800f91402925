//! Error types for the HTTP server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use leaf_renderer::RenderError;
use leaf_storage::StorageError;

/// Error returned by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// Title cannot be used as a page name.
    #[error("Invalid page title: {0:?}")]
    InvalidTitle(String),

    /// Loading or saving a page failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Template loading or evaluation failed.
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Blocking task panicked or was cancelled.
    #[error("Task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidTitle(_) => StatusCode::BAD_REQUEST,
            Self::Storage(_) | Self::Render(_) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Server-side details such as file paths stay in the log
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
            (status, "Internal server error").into_response()
        } else {
            tracing::warn!(error = %self, "Request rejected");
            (status, self.to_string()).into_response()
        }
    }
}

/// Error starting or running the server.
#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    /// Host and port do not form a socket address.
    #[error("Invalid listen address {address}: {source}")]
    InvalidAddress {
        /// The rejected `host:port` string.
        address: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Configured front page is not a valid title.
    #[error("Invalid front page: {0}")]
    InvalidFrontPage(#[source] StorageError),

    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use leaf_storage::StorageErrorKind;

    use super::*;

    #[test]
    fn test_invalid_title_is_bad_request() {
        let response = ServerError::InvalidTitle("../x".to_owned()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_is_internal() {
        let err = StorageError::new(StorageErrorKind::PermissionDenied);
        let response = ServerError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_internal_error_body_hides_details() {
        let err = StorageError::new(StorageErrorKind::Other).with_path("/srv/pages/Home.txt");
        let response = ServerError::from(err).into_response();

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Internal server error");
    }

    #[test]
    fn test_render_error_is_internal() {
        let err = RenderError::TemplateNotFound("view.html".into());
        let response = ServerError::from(err).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ServerError::InvalidTitle("a/b".to_owned()).to_string(),
            "Invalid page title: \"a/b\""
        );
        assert_eq!(
            ServerError::from(RenderError::TemplateNotFound("edit.html".into())).to_string(),
            "Render error: Template not found: edit.html"
        );
    }
}
