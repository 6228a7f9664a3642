//! Error types shared across Collage crates.
//!
//! Mutations that reference an element deleted out from under them are
//! deliberately *not* errors: the store treats them as silent no-ops, so
//! there is no `NotFound` variant to construct.

/// Top-level error type for Collage operations.
#[derive(Debug, thiserror::Error)]
pub enum ComposeError {
    #[error("Invalid payload: {message}")]
    InvalidPayload { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Export target missing: {message}")]
    ExportTargetMissing { message: String },

    #[error("Font error: {message}")]
    Font { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using ComposeError.
pub type ComposeResult<T> = Result<T, ComposeError>;

impl ComposeError {
    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::InvalidPayload {
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn export_target_missing(msg: impl Into<String>) -> Self {
        Self::ExportTargetMissing {
            message: msg.into(),
        }
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font {
            message: msg.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_carry_context() {
        let err = ComposeError::invalid_payload("text patch applied to image element");
        assert!(err.to_string().contains("text patch"));

        let err = ComposeError::export_target_missing("stage has zero area");
        assert!(err.to_string().starts_with("Export target missing"));
    }
}
