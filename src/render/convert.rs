//! Markdown to (unsanitized) HTML with comrak.

use std::panic::{self, AssertUnwindSafe};

use comrak::{Arena, Options, format_html, parse_document};

use super::RenderError;

/// Convert markdown source to HTML.
///
/// Raw HTML in the source passes straight through; the output must go
/// through [`Sanitizer::clean`](super::Sanitizer::clean) before display.
///
/// # Errors
/// Returns an error if the source exceeds `max_bytes`, if the parser
/// panics, or if the formatter fails.
pub fn markdown_to_html(source: &str, max_bytes: usize) -> Result<String, RenderError> {
    if source.len() > max_bytes {
        return Err(RenderError::SourceTooLarge {
            len: source.len(),
            limit: max_bytes,
        });
    }

    let options = create_options();
    let mut out = Vec::with_capacity(source.len() + source.len() / 2);
    let formatted = panic::catch_unwind(AssertUnwindSafe(|| {
        let arena = Arena::new();
        let root = parse_document(&arena, source, &options);
        format_html(root, &options, &mut out)
    }))
    .map_err(|payload| RenderError::from_panic(payload.as_ref()))?;
    formatted?;

    Ok(String::from_utf8(out)?)
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.superscript = true;
    options.extension.subscript = true;

    // Raw HTML is kept here and stripped by the sanitizer.
    options.render.unsafe_ = true;

    options
}
