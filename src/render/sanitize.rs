//! Allow-list HTML sanitization.
//!
//! Everything the converter emits is treated as untrusted: markdown source
//! may be pasted from anywhere and raw HTML passes through conversion.

use std::collections::{HashMap, HashSet};

use ammonia::{Builder, UrlRelative};

/// Tags that survive sanitization.
pub const ALLOWED_TAGS: &[&str] = &[
    "h1", "h2", "h3", "h4", "h5", "h6", //
    "p", "br", "hr", //
    "ul", "ol", "li", //
    "blockquote", "a", "img", "code", "pre", "em", "strong", //
    "table", "thead", "tbody", "tr", "th", "td", //
    "del", "ins", "sup", "sub",
];

/// Attributes that survive sanitization, on any allowed tag.
pub const ALLOWED_ATTRIBUTES: &[&str] = &["href", "src", "alt", "title", "class", "id", "target"];

const URL_SCHEMES: &[&str] = &["http", "https", "mailto"];

/// Tags removed together with their text content.
const DROPPED_WITH_CONTENT: &[&str] = &["script", "style"];

/// Allow-list sanitizer built once and reused for every render.
pub struct Sanitizer {
    builder: Builder<'static>,
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut builder = Builder::empty();
        builder
            .tags(ALLOWED_TAGS.iter().copied().collect::<HashSet<_>>())
            // `empty()` keeps ammonia's per-tag attributes (align, start, cite, ...).
            .tag_attributes(HashMap::new())
            .tag_attribute_values(HashMap::new())
            .generic_attributes(ALLOWED_ATTRIBUTES.iter().copied().collect::<HashSet<_>>())
            .url_schemes(URL_SCHEMES.iter().copied().collect::<HashSet<_>>())
            .url_relative(UrlRelative::PassThrough)
            .clean_content_tags(DROPPED_WITH_CONTENT.iter().copied().collect::<HashSet<_>>())
            .link_rel(Some("noopener noreferrer"))
            .strip_comments(true);
        Self { builder }
    }

    /// Strip `html` down to the allow-list.
    ///
    /// Cleaning already-clean output returns it unchanged.
    pub fn clean(&self, html: &str) -> String {
        self.builder.clean(html).to_string()
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Sanitizer")
            .field("tags", &ALLOWED_TAGS.len())
            .field("attributes", &ALLOWED_ATTRIBUTES)
            .finish()
    }
}
