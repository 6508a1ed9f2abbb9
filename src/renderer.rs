use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context;
use chrono::DateTime;
use handlebars::{handlebars_helper, Handlebars};
use serde::Serialize;

use crate::metadata::PostMetadata;

pub const INDEX_TEMPLATE: &str = "index";

handlebars_helper!(breadcrumbs: |path: str| {
    let mut current = String::from("/");
    let mut res = String::from("<a href=\"/\">/</a> ");
    for (i, segment) in path.split('/').filter(|s| !s.is_empty()).enumerate() {
        current.push_str(segment);
        current.push('/');
        let _ = write!(
            res,
            "{}<a href=\"{}\">{}</a>",
            if i == 0 {""} else {" / "},
            current,
            segment
        );
    }

    res
});

// falls back to the raw value when it is not an RFC 3339 timestamp or the
// format string is invalid
handlebars_helper!(date_format: |date: str, fmt: str| {
    let mut res = String::new();
    match DateTime::parse_from_rfc3339(date) {
        Ok(dt) if write!(res, "{}", dt.format(fmt)).is_ok() => res,
        _ => date.to_string(),
    }
});

#[derive(Serialize, Debug)]
pub struct IndexPageData<'a> {
    pub posts: &'a [PostMetadata],
}

pub fn generate_renderer(template: &Path) -> anyhow::Result<Handlebars<'static>> {
    let mut handlebars = Handlebars::new();
    handlebars.register_helper("breadcrumbs", Box::new(breadcrumbs));
    handlebars.register_helper("date_format", Box::new(date_format));
    handlebars
        .register_template_file(INDEX_TEMPLATE, template)
        .with_context(|| format!("while loading template {template:?}"))?;

    Ok(handlebars)
}

pub fn render_index(handlebars: &Handlebars<'_>, posts: &[PostMetadata]) -> anyhow::Result<String> {
    handlebars
        .render(INDEX_TEMPLATE, &IndexPageData { posts })
        .context("while rendering index")
}
