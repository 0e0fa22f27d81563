//! Error types for the asset library.

use seaturtle_audio::AudioError;
use thiserror::Error;

/// Result type for asset operations.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors that can occur while generating or loading assets.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset name is not in the catalog.
    #[error("unknown asset name: {name:?}")]
    UnknownAsset {
        /// The name that failed to resolve.
        name: String,
    },

    /// Synthesis failed.
    #[error(transparent)]
    Synthesis(#[from] AudioError),

    /// I/O error while writing or reading a cached asset.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl AssetError {
    /// Creates an unknown-asset error.
    pub fn unknown_asset(name: impl Into<String>) -> Self {
        Self::UnknownAsset { name: name.into() }
    }
}
