//! Error types for the layout engine

use thiserror::Error;

use crate::surface::FontError;

/// Errors that abort a layout pass.
///
/// A word that finds no slot is not an error; it is reported in
/// [`LayoutResult::skipped`](super::LayoutResult::skipped).
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The font face could not be resolved, so nothing can be measured or drawn
    #[error("font error: {0}")]
    Font(#[from] FontError),

    /// Configuration values that cannot produce a layout
    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },
}

impl LayoutError {
    /// Create an invalid configuration error
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_config_display() {
        let err = LayoutError::invalid_config("width", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid configuration for 'width': must be positive"
        );
    }

    #[test]
    fn test_font_error_conversion() {
        let err: LayoutError = FontError::InvalidSize(-1.0).into();
        assert!(matches!(err, LayoutError::Font(_)));
        assert!(err.to_string().contains("invalid font size -1"));
    }
}
