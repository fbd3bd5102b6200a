//! Slug command - show the slug derived from a title

use anyhow::{Context, Result};
use clap::Args;
use forum_core::post::{PostSlug, PostTitle};
use forum_core::ForumConfig;

/// Arguments for the slug command
#[derive(Debug, Args)]
pub struct SlugArgs {
    /// Post title
    pub title: String,
}

/// Execute the slug command
pub fn execute(args: SlugArgs, config: &ForumConfig) -> Result<()> {
    let title = PostTitle::with_limits(&args.title, config.validation.post_title)
        .context("Invalid title")?;
    let slug = PostSlug::from_title_with(&title, &config.slug);
    tracing::debug!(title = %title, slug = %slug, "Derived slug");
    println!("{}", slug);
    Ok(())
}
