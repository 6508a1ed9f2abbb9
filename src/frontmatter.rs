use std::{path::Path, sync::LazyLock};

use regex::{Regex, RegexBuilder};
use serde_json::{Map, Value as JsonValue};
use serde_yaml::{Mapping, Value};

use crate::error::CollectError;

// leading `---` block, closed by a `---` line; the block itself may be empty
static HEADER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    RegexBuilder::new(r"\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n|\z)(.*)")
        .dot_matches_new_line(true)
        .build()
        .unwrap()
});

// serde_yaml drops scalar style, so a quoted top-level `date` is spotted here
static QUOTED_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^date[ \t]*:[ \t]*["']"#).unwrap());

/// Front matter of one document, before defaults and validation are applied.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FrontMatter {
    pub title: Option<String>,
    pub date: Option<Value>,
    pub author: Option<String>,
    pub extra: Map<String, JsonValue>,
}

/// Splits `content` into its front-matter block and body.
///
/// Returns `None` as the block when the document has no front matter.
pub fn split(content: &str) -> (Option<&str>, &str) {
    match HEADER_PATTERN.captures(content) {
        Some(caps) => {
            let header = caps.get(1).map_or("", |m| m.as_str());
            let body = caps.get(2).map_or("", |m| m.as_str());
            (Some(header), body)
        }
        None => (None, content),
    }
}

/// Parses the front matter of `content`; `path` is only used for errors.
pub fn parse(path: &Path, content: &str) -> Result<FrontMatter, CollectError> {
    let (header, _body) = split(content);
    let Some(header) = header else {
        return Ok(FrontMatter::default());
    };

    let value: Value =
        serde_yaml::from_str(header).map_err(|source| CollectError::FrontMatter {
            path: path.to_owned(),
            source,
        })?;
    let mapping = match value {
        Value::Mapping(m) => m,
        Value::Null => Mapping::new(),
        _ => {
            return Err(CollectError::NotAMapping {
                path: path.to_owned(),
            })
        }
    };

    let mut fm = FrontMatter::default();
    for (key, value) in mapping {
        let Some(name) = key_text(&key) else {
            return Err(CollectError::Field {
                path: path.to_owned(),
                field: format!("{key:?}"),
                reason: "keys must be scalars".to_string(),
            });
        };
        match name.as_str() {
            "title" => fm.title = scalar_text(&value),
            "author" => fm.author = scalar_text(&value),
            // a quoted date is text, not a timestamp
            "date" if QUOTED_DATE.is_match(header) => fm.date = None,
            "date" => fm.date = Some(value),
            _ => {
                let json = serde_json::to_value(&value).map_err(|e| CollectError::Field {
                    path: path.to_owned(),
                    field: name.clone(),
                    reason: e.to_string(),
                })?;
                fm.extra.insert(name, json);
            }
        }
    }

    Ok(fm)
}

/// Scalar keys read as text, as in `2013: year`.
fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Null => Some("null".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Tagged(tagged) => key_text(&tagged.value),
        Value::Sequence(_) | Value::Mapping(_) => None,
    }
}

/// Text of a scalar; empty strings and non-scalars count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Tagged(tagged) => return scalar_text(&tagged.value),
        _ => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse_ok(content: &str) -> FrontMatter {
        parse(Path::new("post/index.md"), content).unwrap()
    }

    #[test]
    fn split_header_and_body() {
        let (header, body) = split("---\ntitle: Hello\n---\nbody text\n---\nmore");
        assert_eq!(header, Some("title: Hello"));
        assert_eq!(body, "body text\n---\nmore");
    }

    #[test]
    fn split_crlf() {
        let (header, body) = split("---\r\ntitle: Hello\r\n---\r\nbody");
        assert_eq!(header, Some("title: Hello"));
        assert_eq!(body, "body");
    }

    #[test]
    fn split_without_header() {
        let (header, body) = split("# Just markdown\n");
        assert_eq!(header, None);
        assert_eq!(body, "# Just markdown\n");
    }

    #[test]
    fn split_empty_header_at_end_of_file() {
        assert_eq!(split("---\n---"), (Some(""), ""));
    }

    #[test]
    fn known_and_extra_fields() {
        let fm = parse_ok(
            "---\ntitle: Hello\ndate: 2013-01-05\nauthor: Jane\ntags: [a, b]\ndraft: false\n---\nbody",
        );
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.author.as_deref(), Some("Jane"));
        assert_eq!(fm.date, Some(Value::from("2013-01-05")));
        assert_eq!(fm.extra.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(fm.extra.get("draft"), Some(&json!(false)));
        assert!(!fm.extra.contains_key("title"));
    }

    #[test]
    fn quoted_date_is_not_a_timestamp() {
        assert_eq!(parse_ok("---\ntitle: A\ndate: \"2013-01-05\"\n---\n").date, None);
        assert_eq!(parse_ok("---\ntitle: A\ndate: '2013-01-05'\n---\n").date, None);
        assert_eq!(
            parse_ok("---\ntitle: A\nupdated: \"x\"\ndate: 2013-01-05\n---\n").date,
            Some(Value::from("2013-01-05"))
        );
    }

    #[test]
    fn empty_and_missing_values_are_absent() {
        let fm = parse_ok("---\ntitle: ''\nauthor:\n---\n");
        assert_eq!(fm.title, None);
        assert_eq!(fm.author, None);
        assert_eq!(fm.date, None);
    }

    #[test]
    fn numeric_title_becomes_text() {
        assert_eq!(parse_ok("---\ntitle: 1984\n---\n").title.as_deref(), Some("1984"));
    }

    #[test]
    fn no_header_gives_empty_front_matter() {
        assert_eq!(parse_ok("hello"), FrontMatter::default());
        assert_eq!(parse_ok("---\n---\nhello"), FrontMatter::default());
    }

    #[test]
    fn invalid_yaml() {
        let err = parse(Path::new("x/index.md"), "---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, CollectError::FrontMatter { .. }));
    }

    #[test]
    fn scalar_keys_become_text() {
        let fm = parse_ok("---\ntitle: Hello\n2013: year\ntrue: yes\n---\n");
        assert_eq!(fm.title.as_deref(), Some("Hello"));
        assert_eq!(fm.extra.get("2013"), Some(&json!("year")));
        assert_eq!(fm.extra.get("true"), Some(&json!("yes")));
    }

    #[test]
    fn compound_keys_are_rejected() {
        let err = parse(Path::new("x/index.md"), "---\n[a, b]: pair\n---\n").unwrap_err();
        assert!(matches!(err, CollectError::Field { .. }));
    }

    #[test]
    fn sequence_is_not_a_mapping() {
        let err = parse(Path::new("x/index.md"), "---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, CollectError::NotAMapping { .. }));
    }
}
