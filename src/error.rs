use std::path::PathBuf;
use thiserror::Error;

/// Failures while resolving or reading CLI inputs.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("invalid glob pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("glob pattern matched no files: {0}")]
    NoMatches(String),

    #[error(transparent)]
    Glob(#[from] glob::GlobError),

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no input templates given")]
    Empty,
}
