//! Collects the metadata of every published post under a directory tree.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use glob::MatchOptions;
use log::{debug, error, info};
use tokio::task::JoinSet;

use crate::{
    config::CollectorConfig,
    date,
    error::CollectError,
    frontmatter,
    metadata::{sort_post, url_path, PostMetadata},
};

/// Finds every post file under `root`, in path order.
///
/// Wildcards never descend into hidden (dot) directories.
pub fn discover(root: &Path, pattern: &str) -> Result<Vec<PathBuf>, CollectError> {
    let root = glob::Pattern::escape(&root.to_string_lossy());
    let pattern = Path::new(&root).join(pattern).to_string_lossy().into_owned();

    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..Default::default()
    };
    let paths = glob::glob_with(&pattern, options).map_err(|source| CollectError::Pattern {
        pattern: pattern.clone(),
        source,
    })?;

    paths
        .map(|entry| {
            entry.map_err(|e| CollectError::Discovery {
                path: e.path().to_owned(),
                source: e.into_error(),
            })
        })
        .collect()
}

/// Builds the metadata of a single post from its file contents.
///
/// Returns `Ok(None)` for an unpublished post (no valid date).
pub fn build_post(
    path: &Path,
    content: &str,
    config: &CollectorConfig,
) -> Result<Option<PostMetadata>, CollectError> {
    let fm = frontmatter::parse(path, content)?;

    let Some(title) = fm.title else {
        return Err(CollectError::MissingTitle {
            path: path.to_owned(),
        });
    };
    let author = fm
        .author
        .unwrap_or_else(|| config.default_author.clone());

    let Some(date) = fm.date.as_ref().and_then(date::parse_value) else {
        debug!("{path:?} has no valid date, treating as unpublished");
        return Ok(None);
    };

    Ok(Some(PostMetadata {
        title,
        date,
        author,
        path: url_path(path, &config.strip_prefix),
        extra: fm.extra,
    }))
}

async fn load_post(
    path: PathBuf,
    config: Arc<CollectorConfig>,
) -> Result<Option<PostMetadata>, CollectError> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|source| CollectError::Read {
            path: path.clone(),
            source,
        })?;
    // invalid UTF-8 is replaced rather than rejected
    let content = String::from_utf8_lossy(&bytes);
    build_post(&path, &content, &config)
}

/// Collects published posts under `root`, most recent first.
///
/// Every discovered file is read concurrently. The first failure aborts the
/// remaining reads and becomes the result.
pub async fn collect(
    root: impl AsRef<Path>,
    config: &CollectorConfig,
) -> Result<Vec<PostMetadata>, CollectError> {
    let root = root.as_ref();
    let files = discover(root, &config.pattern).inspect_err(|e| {
        error!("Failed to discover posts under {root:?}: {e}");
    })?;
    debug!("Discovered {} post file(s) under {root:?}", files.len());

    let config = Arc::new(config.clone());
    let mut tasks = JoinSet::new();
    for (i, path) in files.into_iter().enumerate() {
        let config = Arc::clone(&config);
        tasks.spawn(async move { (i, load_post(path, config).await) });
    }

    // dropping `tasks` on early return aborts whatever is still in flight
    let mut loaded = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let (i, post) = joined?;
        if let Some(post) = post? {
            loaded.push((i, post));
        }
    }

    // discovery order first, so equal dates keep path order
    loaded.sort_by_key(|(i, _)| *i);
    let mut posts: Vec<PostMetadata> = loaded.into_iter().map(|(_, post)| post).collect();
    posts.sort_by(sort_post);

    info!("Collected {} published post(s)", posts.len());
    Ok(posts)
}

/// Callback flavour of [`collect`].
pub async fn collect_with<F>(root: impl AsRef<Path>, config: &CollectorConfig, callback: F)
where
    F: FnOnce(Result<Vec<PostMetadata>, CollectError>),
{
    callback(collect(root, config).await)
}
