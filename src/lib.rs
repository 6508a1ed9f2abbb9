//! Collects front-matter metadata of blog posts for a static-site build.
//!
//! Every `index.md` under a root directory is read, its front matter parsed,
//! and the published posts (those with a valid `date`) are returned most
//! recent first.

pub mod collector;
pub mod config;
pub mod date;
pub mod error;
pub mod frontmatter;
pub mod metadata;
pub mod output;
pub mod renderer;

pub use collector::{collect, collect_with};
pub use config::CollectorConfig;
pub use error::CollectError;
pub use metadata::PostMetadata;
