use thiserror::Error;

/// Errors raised while building or loading site metadata
#[derive(Error, Debug)]
pub enum HeadError {
    /// A required page field was blank. The resolver recovers from this by
    /// substituting the site default, so it only shows up in logs and lints.
    #[error("missing required field: {field}")]
    MissingRequiredField {
        /// Name of the blank field
        field: &'static str,
    },

    /// The real-time client connection URL is absent or unusable
    #[error("misconfigured environment: {0}")]
    MisconfiguredEnvironment(String),

    /// Route path failed validation
    #[error("invalid route: {0}")]
    InvalidRoute(String),

    /// Route registered twice
    #[error("duplicate route: {0}")]
    DuplicateRoute(String),

    /// Route is not in the registry
    #[error("unknown route: {0}")]
    UnknownRoute(String),

    /// Two routes would be exported to the same file
    #[error("routes {first} and {second} both export to {path}")]
    ExportCollision {
        first: String,
        second: String,
        path: String,
    },

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("invalid index policy pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for metadata operations
pub type Result<T> = std::result::Result<T, HeadError>;
