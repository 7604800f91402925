//! Page view, edit and save endpoints.
//!
//! Each handler takes the page title from the path remainder after its
//! prefix. File access and template rendering run on the blocking pool.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::response::{Html, IntoResponse, Response};
use leaf_renderer::TemplateName;
use leaf_storage::{Page, validate_title};
use percent_encoding::percent_decode;

use crate::error::ServerError;
use crate::handlers::{edit_url, found, view_url};
use crate::state::AppState;

/// Edit form field holding the page content.
const BODY_FIELD: &[u8] = b"body";

/// Extract the `body` field of a urlencoded form as raw bytes.
///
/// The first occurrence wins and a missing field yields an empty body.
/// Decoded bytes are kept as-is, so content need not be UTF-8.
fn form_body(form: &[u8]) -> Vec<u8> {
    form.split(|&b| b == b'&')
        .find_map(|pair| {
            let (name, value) = match pair.iter().position(|&b| b == b'=') {
                Some(eq) => (&pair[..eq], &pair[eq + 1..]),
                None => (pair, &[][..]),
            };
            (form_decode(name) == BODY_FIELD).then(|| form_decode(value))
        })
        .unwrap_or_default()
}

/// Decode one urlencoded component, with `+` standing for a space.
fn form_decode(component: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = component
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}

/// Reject titles that cannot be page names before touching storage.
fn check_title(title: &str) -> Result<(), ServerError> {
    validate_title(title).map_err(|_| ServerError::InvalidTitle(title.to_owned()))
}

/// Run blocking page work off the async executor.
async fn blocking<T, F>(state: &Arc<AppState>, work: F) -> Result<T, ServerError>
where
    F: FnOnce(&AppState) -> Result<T, ServerError> + Send + 'static,
    T: Send + 'static,
{
    let state = Arc::clone(state);
    tokio::task::spawn_blocking(move || work(state.as_ref())).await?
}

/// Handle GET /.
pub(crate) async fn front_page(State(state): State<Arc<AppState>>) -> Response {
    found(&view_url(&state.front_page))
}

/// Handle GET /view/{title}.
///
/// Renders the stored page, or redirects to the editor if it doesn't exist.
pub(crate) async fn view_page(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    check_title(&title)?;

    blocking(&state, move |state| match state.storage.load(&title) {
        Ok(page) => {
            let html = state.renderer.render(TemplateName::View, &page)?;
            Ok(Html(html).into_response())
        }
        Err(e) if e.is_not_found() => Ok(found(&edit_url(&title))),
        Err(e) => Err(e.into()),
    })
    .await
}

/// Handle GET /edit/{title}.
///
/// Renders the editor for the stored page, or for an empty page if it
/// doesn't exist yet.
pub(crate) async fn edit_page(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Response, ServerError> {
    check_title(&title)?;

    blocking(&state, move |state| {
        let page = match state.storage.load(&title) {
            Ok(page) => page,
            Err(e) if e.is_not_found() => Page::empty(title),
            Err(e) => return Err(e.into()),
        };
        let html = state.renderer.render(TemplateName::Edit, &page)?;
        Ok(Html(html).into_response())
    })
    .await
}

/// Handle POST /save/{title}.
///
/// Replaces the page content and redirects to the view page. A failed save
/// is reported as an error instead of redirecting.
pub(crate) async fn save_page(
    Path(title): Path<String>,
    State(state): State<Arc<AppState>>,
    form: Bytes,
) -> Result<Response, ServerError> {
    check_title(&title)?;

    blocking(&state, move |state| {
        let page = Page::new(title, form_body(&form));
        state.storage.save(&page)?;
        Ok(found(&view_url(&page.title)))
    })
    .await
}
