use std::{io::Write, path::PathBuf};

use anyhow::{bail, Context};
use blogmeta::{
    config::{DEFAULT_AUTHOR, DEFAULT_PATTERN, DEFAULT_STRIP_PREFIX},
    output, renderer, CollectorConfig,
};
use clap::{command, Arg};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .args(&[
            Arg::new("root")
                .help("Directory to search for posts")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_STRIP_PREFIX),
            Arg::new("default_author")
                .long("default-author")
                .help("Author of posts that do not name one")
                .env("BLOG_DEFAULT_AUTHOR")
                .default_value(DEFAULT_AUTHOR),
            Arg::new("strip_prefix")
                .long("strip-prefix")
                .help("Leading directory removed when deriving URL paths")
                .value_parser(clap::value_parser!(PathBuf))
                .default_value(DEFAULT_STRIP_PREFIX),
            Arg::new("pattern")
                .long("pattern")
                .help("Glob (relative to root) selecting post files")
                .default_value(DEFAULT_PATTERN),
            Arg::new("template")
                .long("template")
                .help("Handlebars template rendering the list. JSON is written when omitted.")
                .value_parser(clap::value_parser!(PathBuf)),
            Arg::new("out")
                .long("out")
                .short('o')
                .help("Output file. Existing contents will be replaced. Defaults to stdout.")
                .value_parser(clap::value_parser!(PathBuf)),
        ])
        .get_matches();

    let root: &PathBuf = matches.get_one("root").unwrap();
    if !root.is_dir() {
        bail!("root must be a directory.");
    }
    let template: Option<&PathBuf> = matches.get_one("template");
    if template.is_some_and(|t| !t.is_file()) {
        bail!("template must be a file.");
    }

    let config = CollectorConfig::default()
        .with_default_author(matches.get_one::<String>("default_author").unwrap())
        .with_strip_prefix(matches.get_one::<PathBuf>("strip_prefix").unwrap())
        .with_pattern(matches.get_one::<String>("pattern").unwrap());

    let posts = blogmeta::collect(root, &config)
        .await
        .with_context(|| format!("while collecting posts under {root:?}"))?;

    let mut out = output::open_output(matches.get_one::<PathBuf>("out").map(PathBuf::as_path))?;
    match template {
        Some(template) => {
            let handlebars = renderer::generate_renderer(template)?;
            out.write_all(renderer::render_index(&handlebars, &posts)?.as_bytes())?;
            out.flush()?;
        }
        None => output::write_json(out, &posts)?,
    }

    Ok(())
}
