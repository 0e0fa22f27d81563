//! Error types for the synthesis core.

use thiserror::Error;

/// Result type for synthesis operations.
pub type AudioResult<T> = Result<T, AudioError>;

/// Errors that can occur while rendering audio.
#[derive(Debug, Error)]
pub enum AudioError {
    /// A note symbol could not be resolved to a frequency.
    ///
    /// This always indicates a malformed phrase and is never defaulted.
    #[error("unknown note symbol: {name:?}")]
    UnknownNote {
        /// The offending symbol.
        name: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },
}

impl AudioError {
    /// Creates an unknown-note error.
    pub fn unknown_note(name: impl Into<String>) -> Self {
        Self::UnknownNote { name: name.into() }
    }

    /// Creates an invalid parameter error.
    pub fn invalid_param(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_note_message() {
        let err = AudioError::unknown_note("H4");
        assert!(err.to_string().contains("H4"));
    }

    #[test]
    fn test_invalid_param_helper() {
        let err = AudioError::invalid_param("tempo_bpm", "must be positive");
        assert!(err.to_string().contains("tempo_bpm"));
        assert!(err.to_string().contains("positive"));
    }
}
