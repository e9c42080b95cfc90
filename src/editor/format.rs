/// Toolbar formatting actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkdownFormat {
    Bold,
    Italic,
    /// ATX heading; levels outside 1-6 are clamped.
    Heading(u8),
    Link,
    Image,
    UnorderedList,
    OrderedList,
    InlineCode,
    CodeBlock,
    Blockquote,
}

impl MarkdownFormat {
    /// Text inserted before and after the selection.
    pub fn markers(self) -> (String, &'static str) {
        match self {
            Self::Bold => ("**".into(), "**"),
            Self::Italic => ("*".into(), "*"),
            Self::Heading(level) => {
                let level = usize::from(level.clamp(1, 6));
                (format!("{} ", "#".repeat(level)), "")
            }
            Self::Link => ("[".into(), "](url)"),
            Self::Image => ("![alt text](".into(), ")"),
            Self::UnorderedList => ("- ".into(), ""),
            Self::OrderedList => ("1. ".into(), ""),
            Self::InlineCode => ("`".into(), "`"),
            Self::CodeBlock => ("```\n".into(), "\n```"),
            Self::Blockquote => ("> ".into(), ""),
        }
    }
}
