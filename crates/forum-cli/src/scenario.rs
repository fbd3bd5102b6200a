//! Scenario files replayed by `forum-sim run`
//!
//! A scenario seeds one post with comments and then lists vote requests in
//! order. Prior votes for each request are read back from the target's live
//! votes, the way a repository read would return them.

use anyhow::{Context, Result};
use forum_core::{
    CommentBuilder, CommentId, ForumConfig, ForumError, Member, MemberId, Post, PostBuilder,
    PostId, PostService, UserId, UserName, VoteDirection, VoteOutcome,
};
use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Whole scenario file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub post: PostEntry,
    #[serde(default)]
    pub members: Vec<MemberEntry>,
    #[serde(default)]
    pub comments: Vec<CommentEntry>,
    #[serde(default)]
    pub votes: Vec<VoteEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostEntry {
    pub id: Option<String>,
    pub author: String,
    pub title: String,
    pub text: Option<String>,
    pub link: Option<String>,
}

/// A declared member; `user` and `username` default to the member id
#[derive(Debug, Clone, Deserialize)]
pub struct MemberEntry {
    pub id: String,
    pub user: Option<String>,
    pub username: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentEntry {
    pub id: String,
    pub author: String,
    pub text: String,
    pub parent: Option<String>,
}

/// One vote request; targets the post when `comment` is absent
#[derive(Debug, Clone, Deserialize)]
pub struct VoteEntry {
    pub member: String,
    pub comment: Option<String>,
    pub direction: VoteDirection,
}

/// Result of a single vote request
#[derive(Debug, Clone, Serialize)]
pub struct VoteStep {
    pub member: MemberId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<CommentId>,
    pub direction: VoteDirection,
    pub outcome: VoteOutcome,
}

/// Post state after replaying a scenario
#[derive(Debug)]
pub struct Replay {
    pub post: Post,
    pub steps: Vec<VoteStep>,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Invalid scenario {}", path.display()))
    }

    /// Parse a scenario from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        if scenario.post.text.is_some() && scenario.post.link.is_some() {
            anyhow::bail!("post must have either text or link, not both");
        }
        Ok(scenario)
    }

    /// Build the post, attach comments, then apply every vote in order
    ///
    /// With `commit` the seeded post and comments count as already stored,
    /// so only the vote changes remain pending.
    pub fn replay(&self, config: &ForumConfig, commit: bool) -> Result<Replay> {
        let mut members = self.members(config)?;
        let mut post = self.build_post(config)?;

        for entry in &self.comments {
            let mut builder = CommentBuilder::new(post.id().clone(), member_id(&entry.author)?)
                .id(comment_id(&entry.id)?)
                .text(entry.text.as_str())
                .limits(config.validation.comment_text);
            if let Some(parent) = &entry.parent {
                builder = builder.reply_to(comment_id(parent)?);
            }
            let comment = builder
                .build()
                .with_context(|| format!("Invalid comment '{}'", entry.id))?;
            post.add_comment(comment);
        }

        if commit {
            post.commit();
            debug!(post = %post.id(), "Seeded post committed");
        }

        let service = PostService::new();
        let mut steps = Vec::with_capacity(self.votes.len());

        for request in &self.votes {
            let member = members.resolve(&request.member, config)?.clone();

            let (comment, outcome) = match &request.comment {
                Some(raw) => {
                    let id = comment_id(raw)?;
                    let mut comment = post
                        .comment(&id)
                        .cloned()
                        .ok_or_else(|| ForumError::CommentNotFound(id.to_string()))?;
                    let existing = comment.votes_by(&member.member_id);
                    let outcome = match request.direction {
                        VoteDirection::Upvote => {
                            service.upvote_comment(&mut post, &member, &mut comment, &existing)
                        }
                        VoteDirection::Downvote => {
                            service.downvote_comment(&mut post, &member, &mut comment, &existing)
                        }
                    };
                    (Some(id), outcome)
                }
                None => {
                    let existing = post.votes_by(&member.member_id);
                    let outcome = match request.direction {
                        VoteDirection::Upvote => service.upvote_post(&mut post, &member, &existing),
                        VoteDirection::Downvote => {
                            service.downvote_post(&mut post, &member, &existing)
                        }
                    };
                    (None, outcome)
                }
            };

            steps.push(VoteStep {
                member: member.member_id.clone(),
                comment,
                direction: request.direction,
                outcome,
            });
        }

        info!(
            post = %post.id(),
            comments = post.total_comment_count(),
            votes = steps.len(),
            "Scenario replayed"
        );

        Ok(Replay { post, steps })
    }

    fn build_post(&self, config: &ForumConfig) -> Result<Post> {
        let entry = &self.post;
        let mut builder =
            PostBuilder::new(member_id(&entry.author)?, entry.title.as_str()).config(config);
        if let Some(id) = &entry.id {
            builder = builder.id(PostId::from_string(id.as_str())?);
        }
        if let Some(text) = &entry.text {
            builder = builder.text(text.as_str());
        }
        if let Some(link) = &entry.link {
            builder = builder.link(link.as_str());
        }
        builder.build().context("Invalid post")
    }

    fn members(&self, config: &ForumConfig) -> Result<MemberDirectory> {
        let mut members = MemberDirectory::default();
        for entry in &self.members {
            let username = entry.username.as_deref().unwrap_or(&entry.id);
            let username = UserName::with_limits(username, config.validation.username)
                .with_context(|| format!("Invalid username for member '{}'", entry.id))?;
            let user_id = UserId::from_string(entry.user.as_deref().unwrap_or(&entry.id))?;
            members.declared.insert(
                entry.id.clone(),
                Member::new(member_id(&entry.id)?, user_id, username),
            );
        }
        Ok(members)
    }
}

/// Members a scenario votes as
///
/// Declared members come from `[[members]]`. Any other id is turned into a
/// member the first time a vote names it.
#[derive(Debug, Default)]
struct MemberDirectory {
    declared: HashMap<String, Member>,
    implicit: HashMap<String, Member>,
}

impl MemberDirectory {
    fn resolve(&mut self, id: &str, config: &ForumConfig) -> Result<&Member> {
        if let Some(member) = self.declared.get(id) {
            return Ok(member);
        }
        match self.implicit.entry(id.to_string()) {
            Entry::Occupied(known) => Ok(known.into_mut()),
            Entry::Vacant(slot) => Ok(slot.insert(implicit_member(id, config)?)),
        }
    }
}

/// A member referenced by a vote but not declared; user and username are the id
fn implicit_member(id: &str, config: &ForumConfig) -> Result<Member> {
    let username = UserName::with_limits(id, config.validation.username)
        .with_context(|| format!("Invalid username for member '{}'", id))?;
    Ok(Member::new(member_id(id)?, UserId::from_string(id)?, username))
}

fn member_id(raw: &str) -> Result<MemberId> {
    Ok(MemberId::from_string(raw)?)
}

fn comment_id(raw: &str) -> Result<CommentId> {
    Ok(CommentId::from_string(raw)?)
}
