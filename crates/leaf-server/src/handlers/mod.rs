//! HTTP request handlers.

pub(crate) mod pages;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use leaf_renderer::encode_title;

/// URL of the view page for `title`.
pub(crate) fn view_url(title: &str) -> String {
    format!("/view/{}", encode_title(title))
}

/// URL of the edit page for `title`.
pub(crate) fn edit_url(title: &str) -> String {
    format!("/edit/{}", encode_title(title))
}

/// `302 Found` redirect to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_owned())]).into_response()
}
