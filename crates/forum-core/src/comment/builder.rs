//! Comment builder for fluent API

use super::model::{Comment, CommentText};
use crate::config::{TextLimits, ValidationConfig};
use crate::error::{Result, ValidationError};
use crate::tracked::TrackedCollection;
use crate::types::{CommentId, MemberId, PostId};
use crate::vote::CommentVote;
use chrono::{DateTime, Utc};

/// Builder for creating comments with fluent API
pub struct CommentBuilder {
    id: Option<CommentId>,
    post_id: PostId,
    member_id: MemberId,
    text: Option<String>,
    parent_comment_id: Option<CommentId>,
    votes: Vec<CommentVote>,
    created_at: Option<DateTime<Utc>>,
    limits: TextLimits,
}

impl CommentBuilder {
    /// Create a new builder for a comment on a post by a member
    pub fn new(post_id: PostId, member_id: MemberId) -> Self {
        Self {
            id: None,
            post_id,
            member_id,
            text: None,
            parent_comment_id: None,
            votes: Vec::new(),
            created_at: None,
            limits: ValidationConfig::default().comment_text,
        }
    }

    /// Use a known id instead of generating one
    pub fn id(mut self, id: CommentId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the comment text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Make this a reply to another comment
    pub fn reply_to(mut self, parent: CommentId) -> Self {
        self.parent_comment_id = Some(parent);
        self
    }

    /// Set the text length limits
    pub fn limits(mut self, limits: TextLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Votes already persisted for this comment
    pub fn persisted_votes(mut self, votes: impl IntoIterator<Item = CommentVote>) -> Self {
        self.votes.extend(votes);
        self
    }

    /// Set the creation time (for comments loaded from storage)
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the comment
    pub fn build(self) -> Result<Comment> {
        let text = self.text.ok_or(ValidationError::Empty {
            field: "comment text",
        })?;
        let text = CommentText::with_limits(&text, self.limits)?;

        Ok(Comment {
            id: self.id.unwrap_or_else(CommentId::generate),
            post_id: self.post_id,
            member_id: self.member_id,
            text,
            parent_comment_id: self.parent_comment_id,
            votes: TrackedCollection::from_snapshot(self.votes),
            created_at: self.created_at.unwrap_or_else(Utc::now),
        })
    }
}
