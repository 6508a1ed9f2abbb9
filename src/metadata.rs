use std::{
    borrow::Borrow,
    cmp::Ordering,
    path::{Component, Path},
};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

/// Metadata of one published post.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PostMetadata {
    pub title: String,
    pub date: DateTime<Utc>,
    pub author: String,
    /// URL path of the post's directory, e.g. `/blog/my-post/`.
    pub path: String,
    /// Every other front-matter field, unchanged.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Derives the URL path of the post stored at `file`.
///
/// The parent directory loses a leading `strip_prefix`, is lower-cased and
/// gets a trailing slash.
pub fn url_path(file: &Path, strip_prefix: &Path) -> String {
    let dir = without_leading_cur_dir(file.parent().unwrap_or(Path::new("")));
    let strip_prefix = without_leading_cur_dir(strip_prefix);

    let mut url = match dir.strip_prefix(strip_prefix) {
        Ok(rest) => format!("/{}", slashed(rest)),
        Err(_) => slashed(dir),
    }
    .to_lowercase();
    if !url.ends_with('/') {
        url.push('/');
    }
    url
}

fn without_leading_cur_dir(path: &Path) -> &Path {
    let mut components = path.components();
    while components.clone().next() == Some(Component::CurDir) {
        components.next();
    }
    components.as_path()
}

fn slashed(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
        .replace("//", "/")
}

/// Most recent first.
pub fn sort_post<T: Borrow<PostMetadata>>(a: &T, b: &T) -> Ordering {
    b.borrow().date.cmp(&a.borrow().date)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn contents() -> &'static Path {
        Path::new("contents")
    }

    #[test]
    fn strips_contents_and_lowercases() {
        assert_eq!(
            url_path(Path::new("contents/blog/My-Post/index.md"), contents()),
            "/blog/my-post/"
        );
    }

    #[test]
    fn root_post_maps_to_slash() {
        assert_eq!(url_path(Path::new("contents/index.md"), contents()), "/");
    }

    #[test]
    fn leading_current_dir_is_ignored() {
        assert_eq!(
            url_path(Path::new("./contents/blog/a/index.md"), contents()),
            "/blog/a/"
        );
    }

    #[test]
    fn prefix_with_leading_current_dir() {
        assert_eq!(
            url_path(Path::new("./contents/blog/x/index.md"), Path::new("./contents")),
            "/blog/x/"
        );
        assert_eq!(
            url_path(Path::new("contents/blog/x/index.md"), Path::new("./contents")),
            "/blog/x/"
        );
    }

    #[test]
    fn prefix_must_be_a_whole_component() {
        assert_eq!(
            url_path(Path::new("contentsx/a/index.md"), contents()),
            "contentsx/a/"
        );
    }

    #[test]
    fn unmatched_prefix_keeps_directory() {
        assert_eq!(url_path(Path::new("posts/A/index.md"), contents()), "posts/a/");
        assert_eq!(url_path(Path::new("/srv/Site/index.md"), contents()), "/srv/site/");
    }

    #[test]
    fn absolute_prefix() {
        assert_eq!(
            url_path(
                Path::new("/tmp/site/contents/2020/Hello/index.md"),
                Path::new("/tmp/site/contents")
            ),
            "/2020/hello/"
        );
    }

    #[test]
    fn sorts_descending() {
        let post = |title: &str, day: u32| PostMetadata {
            title: title.to_string(),
            date: Utc.with_ymd_and_hms(2020, 1, day, 0, 0, 0).unwrap(),
            author: "a".to_string(),
            path: "/".to_string(),
            extra: Map::new(),
        };
        let mut posts = vec![post("old", 1), post("new", 3), post("mid", 2)];
        posts.sort_by(sort_post);
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["new", "mid", "old"]);
    }
}
