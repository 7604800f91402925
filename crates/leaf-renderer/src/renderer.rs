//! Template-based page renderer.

use std::borrow::Cow;
use std::path::PathBuf;

use leaf_storage::Page;
use minijinja::{Environment, context};
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};

use crate::error::RenderError;

/// Characters escaped when a title is used as a single URL path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Built-in `view` template.
const EMBEDDED_VIEW: &str = include_str!("../templates/view.html");

/// Built-in `edit` template.
const EMBEDDED_EDIT: &str = include_str!("../templates/edit.html");

/// Encode a page title as a URL path segment.
#[must_use]
pub fn encode_title(title: &str) -> String {
    utf8_percent_encode(title, PATH_SEGMENT).to_string()
}

/// The two page templates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TemplateName {
    /// Read-only page display.
    View,
    /// Page editing form.
    Edit,
}

impl TemplateName {
    /// Template name without extension.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::View => "view",
            Self::Edit => "edit",
        }
    }

    /// Template file name (`<name>.html`).
    #[must_use]
    pub fn file_name(self) -> String {
        format!("{}.html", self.as_str())
    }

    fn embedded(self) -> &'static str {
        match self {
            Self::View => EMBEDDED_VIEW,
            Self::Edit => EMBEDDED_EDIT,
        }
    }
}

/// Where template sources come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary.
    Embedded,
    /// `<dir>/<name>.html`, re-read on every render.
    Directory(PathBuf),
}

/// Renders pages into HTML documents.
pub struct Renderer {
    env: Environment<'static>,
    source: TemplateSource,
}

impl Renderer {
    /// Create a renderer reading templates from `source`.
    #[must_use]
    pub fn new(source: TemplateSource) -> Self {
        Self {
            env: Environment::new(),
            source,
        }
    }

    /// Render `page` with the given template.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the template cannot be loaded, fails to
    /// parse, or fails to evaluate.
    pub fn render(&self, template: TemplateName, page: &Page) -> Result<String, RenderError> {
        let source = self.load_source(template)?;
        let content = page.content_str();

        let html = self.env.render_named_str(
            &template.file_name(),
            &source,
            context! {
                title => &page.title,
                title_url => encode_title(&page.title),
                content => content.as_ref(),
                body => content.as_ref(),
            },
        )?;

        tracing::debug!(template = template.as_str(), title = %page.title, "Rendered page");
        Ok(html)
    }

    /// Load template source text.
    fn load_source(&self, template: TemplateName) -> Result<Cow<'static, str>, RenderError> {
        match &self.source {
            TemplateSource::Embedded => Ok(Cow::Borrowed(template.embedded())),
            TemplateSource::Directory(dir) => {
                let path = dir.join(template.file_name());
                match std::fs::read_to_string(&path) {
                    Ok(text) => Ok(Cow::Owned(text)),
                    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                        Err(RenderError::TemplateNotFound(path))
                    }
                    Err(source) => Err(RenderError::Io { path, source }),
                }
            }
        }
    }
}
