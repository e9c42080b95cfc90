use std::string::FromUtf8Error;

use thiserror::Error;

/// Why a markdown source could not be converted.
///
/// None of these ever reach the host as a failure: the pipeline logs them
/// and shows [`FALLBACK_HTML`](super::FALLBACK_HTML) instead.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("markdown source is {len} bytes, limit is {limit}")]
    SourceTooLarge { len: usize, limit: usize },

    #[error("failed to format html: {0}")]
    Format(#[from] std::io::Error),

    #[error("formatter produced invalid utf-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error("markdown parser panicked: {0}")]
    Panicked(String),
}

impl RenderError {
    pub(super) fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        Self::Panicked(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_payload_str_is_preserved() {
        let err = RenderError::from_panic(&"boom");
        assert_eq!(err.to_string(), "markdown parser panicked: boom");
    }

    #[test]
    fn test_panic_payload_string_is_preserved() {
        let err = RenderError::from_panic(&String::from("bad node"));
        assert!(matches!(err, RenderError::Panicked(ref m) if m == "bad node"));
    }

    #[test]
    fn test_source_too_large_message() {
        let err = RenderError::SourceTooLarge { len: 10, limit: 4 };
        assert_eq!(err.to_string(), "markdown source is 10 bytes, limit is 4");
    }
}
