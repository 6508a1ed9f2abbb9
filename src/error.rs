use std::path::PathBuf;

use thiserror::Error;

/// Terminal failures of a collection run.
///
/// Any of these aborts the whole batch; no partial list is returned alongside.
#[derive(Error, Debug)]
pub enum CollectError {
    /// The discovery pattern could not be compiled
    #[error("invalid glob pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        source: glob::PatternError,
    },
    /// Walking the directory tree failed
    #[error("failed to scan {path:?}: {source}")]
    Discovery {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A discovered file could not be read
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The front-matter block is not valid YAML
    #[error("invalid front matter in {path:?}: {source}")]
    FrontMatter {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    /// The front-matter block parsed, but not into key/value pairs
    #[error("front matter in {path:?} is not a key/value mapping")]
    NotAMapping { path: PathBuf },
    /// A front-matter field holds a value that cannot be passed through
    #[error("unsupported value for {field:?} in {path:?}: {reason}")]
    Field {
        path: PathBuf,
        field: String,
        reason: String,
    },
    /// The post has no usable title
    #[error("{path:?} has no title")]
    MissingTitle { path: PathBuf },
    /// A collector task panicked or was cancelled
    #[error("collector task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CollectError {
    /// Path of the source file (or directory) the error is about, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            Self::Discovery { path, .. }
            | Self::Read { path, .. }
            | Self::FrontMatter { path, .. }
            | Self::NotAMapping { path }
            | Self::Field { path, .. }
            | Self::MissingTitle { path } => Some(path),
            Self::Pattern { .. } | Self::Task(_) => None,
        }
    }

    /// Whether the error points at a malformed source file rather than I/O trouble.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::FrontMatter { .. }
                | Self::NotAMapping { .. }
                | Self::Field { .. }
                | Self::MissingTitle { .. }
        )
    }
}
