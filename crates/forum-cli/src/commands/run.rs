//! Run command - replay a scenario and print the pending changes

use crate::scenario::{Replay, Scenario};
use anyhow::{Context, Result};
use clap::Args;
use forum_core::{ForumConfig, PostChangeset, VoteOutcome};
use serde::Serialize;
use std::path::PathBuf;

/// Arguments for the run command
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Scenario file (TOML)
    pub scenario: PathBuf,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat the seeded post and comments as already stored
    #[arg(long)]
    pub commit: bool,
}

#[derive(Serialize)]
struct RunReport<'a> {
    steps: &'a [crate::scenario::VoteStep],
    changeset: &'a PostChangeset,
}

/// Execute the run command
pub fn execute(args: RunArgs, config: &ForumConfig) -> Result<()> {
    let scenario = Scenario::load(&args.scenario)?;
    let replay = scenario.replay(config, args.commit)?;
    let changeset = PostChangeset::from_post(&replay.post);

    if args.json {
        let report = RunReport {
            steps: &replay.steps,
            changeset: &changeset,
        };
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    print_text(&replay, &changeset);
    Ok(())
}

fn print_text(replay: &Replay, changeset: &PostChangeset) {
    use colored::Colorize;

    let post = &replay.post;
    println!(
        "{} {} ({})",
        "Post".bold(),
        post.title().as_str().cyan(),
        changeset.slug.dimmed()
    );
    println!(
        "  Comments: {} total, {} first-level",
        changeset.total_comments, changeset.first_level_comments
    );
    println!("  Points:   {}", changeset.points);

    if !replay.steps.is_empty() {
        println!();
        println!("{}", "Votes".bold());
        for step in &replay.steps {
            let target = match &step.comment {
                Some(id) => format!("comment {}", id),
                None => "post".to_string(),
            };
            let outcome = match step.outcome {
                VoteOutcome::Added => "added".green(),
                VoteOutcome::Removed => "removed".red(),
                VoteOutcome::Unchanged => "unchanged".yellow(),
            };
            println!("  {} {} {}: {}", step.member, step.direction, target, outcome);
        }
    }

    println!();
    if changeset.is_empty() {
        println!("{}", "No pending changes".dimmed());
        return;
    }

    println!("{}", "Pending changes".bold());
    for id in &changeset.new_comments {
        println!("  {} comment {}", "+".green(), id);
    }
    for id in &changeset.removed_comments {
        println!("  {} comment {}", "-".red(), id);
    }
    for vote in &changeset.new_post_votes {
        println!("  {} post {} by {}", "+".green(), vote.direction, vote.member_id);
    }
    for vote in &changeset.removed_post_votes {
        println!("  {} post {} by {}", "-".red(), vote.direction, vote.member_id);
    }
    for changes in &changeset.comment_votes {
        for vote in &changes.new_votes {
            println!(
                "  {} {} on comment {} by {}",
                "+".green(),
                vote.direction,
                changes.comment_id,
                vote.member_id
            );
        }
        for vote in &changes.removed_votes {
            println!(
                "  {} {} on comment {} by {}",
                "-".red(),
                vote.direction,
                changes.comment_id,
                vote.member_id
            );
        }
    }
}
