//! HTML page rendering for the Leaf page editor.
//!
//! Renders a [`Page`](leaf_storage::Page) into an HTML document using one of
//! two named templates, `view` and `edit`. Templates are evaluated with
//! `minijinja`; files named `*.html` are auto-escaped, so page content
//! containing markup is displayed as text.
//!
//! # Template Context
//!
//! Every template receives:
//! - `title` - page title
//! - `title_url` - page title encoded as a URL path segment
//! - `content` - page body as text (invalid UTF-8 replaced)
//! - `body` - alias of `content`
//!
//! # Example
//!
//! ```ignore
//! use leaf_renderer::{Renderer, TemplateName, TemplateSource};
//! use leaf_storage::Page;
//!
//! let renderer = Renderer::new(TemplateSource::Embedded);
//! let html = renderer.render(TemplateName::View, &Page::new("Home", "Welcome"))?;
//! ```

mod error;
mod renderer;

pub use error::RenderError;
pub use renderer::{Renderer, TemplateName, TemplateSource, encode_title};
