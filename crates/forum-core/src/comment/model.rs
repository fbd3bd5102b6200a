//! Comment data models

use crate::config::{TextLimits, ValidationConfig};
use crate::error::ValidationError;
use crate::tracked::{Identified, TrackedCollection};
use crate::types::{CommentId, MemberId, PostId};
use crate::validation::TextValidator;
use crate::vote::{self, CommentVote, Votable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated comment body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentText(String);

impl CommentText {
    /// Validate with the default limits
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        Self::with_limits(value, ValidationConfig::default().comment_text)
    }

    /// Validate with explicit limits
    pub fn with_limits(value: &str, limits: TextLimits) -> Result<Self, ValidationError> {
        TextValidator::new("comment text", limits)
            .validate(value)
            .map(CommentText)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A comment on a post, optionally replying to another comment
///
/// The parent is a plain id. Resolving it is the owning post's job.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub(crate) id: CommentId,
    pub(crate) post_id: PostId,
    pub(crate) member_id: MemberId,
    pub(crate) text: CommentText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) parent_comment_id: Option<CommentId>,
    #[serde(default)]
    pub(crate) votes: TrackedCollection<CommentVote>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Comment {
    /// Get the comment ID
    pub fn id(&self) -> &CommentId {
        &self.id
    }

    /// Post this comment belongs to
    pub fn post_id(&self) -> &PostId {
        &self.post_id
    }

    /// Author of the comment
    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    /// Get the comment body
    pub fn text(&self) -> &CommentText {
        &self.text
    }

    /// Comment this one replies to, if any
    pub fn parent_comment_id(&self) -> Option<&CommentId> {
        self.parent_comment_id.as_ref()
    }

    /// When the comment was written
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check if this comment replies directly to the post
    pub fn is_first_level(&self) -> bool {
        self.parent_comment_id.is_none()
    }

    /// Loaded votes with their pending changes
    pub fn votes(&self) -> &TrackedCollection<CommentVote> {
        &self.votes
    }

    /// Active votes cast by one member
    pub fn votes_by(&self, member_id: &MemberId) -> Vec<CommentVote> {
        self.votes
            .iter()
            .filter(|v| v.is_by(member_id))
            .cloned()
            .collect()
    }

    /// Upvotes minus downvotes among the loaded votes
    pub fn points(&self) -> i64 {
        vote::points(&self.votes)
    }

    /// Record a vote on this comment
    pub fn add_vote(&mut self, vote: CommentVote) {
        self.votes.add(vote);
    }

    /// Retract a vote on this comment
    pub fn remove_vote(&mut self, vote: &CommentVote) {
        self.votes.remove(vote);
    }
}

impl Identified for Comment {
    type Key = CommentId;

    fn key(&self) -> &CommentId {
        &self.id
    }
}

impl Votable for Comment {
    type Target = CommentId;

    fn vote_target(&self) -> &CommentId {
        &self.id
    }

    fn add_vote(&mut self, vote: CommentVote) {
        Comment::add_vote(self, vote);
    }

    fn remove_vote(&mut self, vote: &CommentVote) {
        Comment::remove_vote(self, vote);
    }
}
