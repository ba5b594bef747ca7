//! Error types for the Lifeprint binary.
//!
//! [`RenderError`] wraps every failure that can happen between loading the
//! config and writing the last file, so `main` can propagate with `?`.

/// Top-level error for the Lifeprint binary.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: lifeprint_core::config::ConfigError,
    },

    /// Creating the output folder or writing a file failed.
    #[error("output error: {source}")]
    Output {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Serializing the run manifest failed.
    #[error("manifest error: {source}")]
    Manifest {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}
