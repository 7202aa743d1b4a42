//! Error types for reference data loading.

/// Errors that can occur while loading reference data.
#[derive(Debug, thiserror::Error)]
pub enum DexError {
    /// Failed to read the data file from disk.
    #[error("failed to read dex file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// The data file is not valid JSON or does not match the schema.
    #[error("failed to parse dex JSON: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
