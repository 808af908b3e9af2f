use thiserror::Error;

/// Common error type shared by the blockwright crates
#[derive(Error, Debug)]
pub enum CommonError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Block type configures both a template and inline markup")]
    BothContentSources,

    #[error("Block type configures neither a template nor inline markup")]
    NoContentSource,
}
