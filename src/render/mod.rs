//! Markdown to sanitized HTML.
//!
//! This module handles:
//! - Converting markdown with comrak (tables, strikethrough, autolinks)
//! - Sanitizing the result against a fixed tag/attribute allow-list
//! - Debouncing and ordering renders for a live preview ([`RenderPipeline`])

mod convert;
mod error;
mod pipeline;
mod sanitize;

pub use convert::markdown_to_html;
pub use error::RenderError;
pub use pipeline::{CompletedRender, DEFAULT_DEBOUNCE_MS, RenderJob, RenderOutput, RenderPipeline};
pub use sanitize::{ALLOWED_ATTRIBUTES, ALLOWED_TAGS, Sanitizer};

/// Shown in place of the preview when conversion fails.
pub const FALLBACK_HTML: &str =
    r#"<p class="render-error">An error occurred while processing the markdown.</p>"#;

/// Default size limit for a single markdown source.
pub const DEFAULT_MAX_SOURCE_BYTES: usize = 4 * 1024 * 1024;

/// Converts and sanitizes markdown in one step.
#[derive(Debug)]
pub struct Renderer {
    sanitizer: Sanitizer,
    max_source_bytes: usize,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            sanitizer: Sanitizer::new(),
            max_source_bytes: DEFAULT_MAX_SOURCE_BYTES,
        }
    }

    /// Set the largest source accepted before rendering falls back.
    pub fn with_max_source_bytes(mut self, limit: usize) -> Self {
        self.max_source_bytes = limit;
        self
    }

    /// Convert and sanitize, reporting conversion failures.
    ///
    /// # Errors
    /// Returns the conversion error; nothing unsanitized is ever returned.
    pub fn try_render(&self, source: &str) -> Result<String, RenderError> {
        let raw = markdown_to_html(source, self.max_source_bytes)?;
        Ok(self.sanitizer.clean(&raw))
    }

    /// Convert and sanitize, substituting [`FALLBACK_HTML`] on failure.
    pub fn render(&self, source: &str) -> String {
        self.render_output(source).0
    }

    /// Like [`render`](Self::render), also reporting whether the fallback
    /// was used.
    pub fn render_output(&self, source: &str) -> (String, bool) {
        match self.try_render(source) {
            Ok(html) => (html, false),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    bytes = source.len(),
                    "markdown render failed, showing fallback"
                );
                (FALLBACK_HTML.to_string(), true)
            }
        }
    }

    pub const fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
