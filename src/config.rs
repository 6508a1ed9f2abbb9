use std::path::PathBuf;

pub const DEFAULT_AUTHOR: &str = "Toby Ho";
pub const DEFAULT_STRIP_PREFIX: &str = "contents";
pub const DEFAULT_PATTERN: &str = "**/index.md";

/// Settings for one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Used when a post has no (or an empty) `author` field.
    pub default_author: String,
    /// Leading directory removed from a post's directory to form its URL path.
    pub strip_prefix: PathBuf,
    /// Glob, relative to the root, that selects post files.
    pub pattern: String,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            default_author: DEFAULT_AUTHOR.to_string(),
            strip_prefix: PathBuf::from(DEFAULT_STRIP_PREFIX),
            pattern: DEFAULT_PATTERN.to_string(),
        }
    }
}

impl CollectorConfig {
    pub fn with_default_author(mut self, author: impl Into<String>) -> Self {
        self.default_author = author.into();
        self
    }

    pub fn with_strip_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.strip_prefix = prefix.into();
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }
}
