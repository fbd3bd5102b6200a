//! Vote data models

use crate::tracked::Identified;
use crate::types::{CommentId, MemberId, PostId, VoteId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteDirection {
    Upvote,
    Downvote,
}

impl VoteDirection {
    /// The other direction
    pub fn opposite(self) -> Self {
        match self {
            VoteDirection::Upvote => VoteDirection::Downvote,
            VoteDirection::Downvote => VoteDirection::Upvote,
        }
    }

    /// Contribution of one vote to a points total
    pub fn weight(self) -> i64 {
        match self {
            VoteDirection::Upvote => 1,
            VoteDirection::Downvote => -1,
        }
    }
}

impl fmt::Display for VoteDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteDirection::Upvote => write!(f, "upvote"),
            VoteDirection::Downvote => write!(f, "downvote"),
        }
    }
}

/// One member's vote on one target
///
/// Votes are never edited. Changing direction means removing one vote and
/// adding another. Two votes are equal when their ids are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote<T> {
    id: VoteId,
    member_id: MemberId,
    target_id: T,
    direction: VoteDirection,
    created_at: DateTime<Utc>,
}

/// A vote on a comment
pub type CommentVote = Vote<CommentId>;

/// A vote on a post
pub type PostVote = Vote<PostId>;

impl<T> Vote<T> {
    /// Create a new vote with a fresh id
    pub fn new(member_id: MemberId, target_id: T, direction: VoteDirection) -> Self {
        Self::with_id(VoteId::generate(), member_id, target_id, direction)
    }

    /// Create a vote with a known id (e.g. loaded from storage)
    pub fn with_id(id: VoteId, member_id: MemberId, target_id: T, direction: VoteDirection) -> Self {
        Self {
            id,
            member_id,
            target_id,
            direction,
            created_at: Utc::now(),
        }
    }

    /// Create an upvote with a fresh id
    pub fn create_upvote(member_id: MemberId, target_id: T) -> Self {
        Self::new(member_id, target_id, VoteDirection::Upvote)
    }

    /// Create a downvote with a fresh id
    pub fn create_downvote(member_id: MemberId, target_id: T) -> Self {
        Self::new(member_id, target_id, VoteDirection::Downvote)
    }

    /// Get the vote ID
    pub fn id(&self) -> &VoteId {
        &self.id
    }

    /// Member who cast the vote
    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    /// Comment or post the vote is on
    pub fn target_id(&self) -> &T {
        &self.target_id
    }

    /// Get the direction
    pub fn direction(&self) -> VoteDirection {
        self.direction
    }

    /// When the vote was cast
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Check if this is an upvote
    pub fn is_upvote(&self) -> bool {
        self.direction == VoteDirection::Upvote
    }

    /// Check if this is a downvote
    pub fn is_downvote(&self) -> bool {
        self.direction == VoteDirection::Downvote
    }

    /// Check if this vote was cast by a member
    pub fn is_by(&self, member_id: &MemberId) -> bool {
        &self.member_id == member_id
    }
}

impl<T> PartialEq for Vote<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Vote<T> {}

impl<T> Identified for Vote<T> {
    type Key = VoteId;

    fn key(&self) -> &VoteId {
        &self.id
    }
}

/// Sum of vote weights
pub fn points<'a, T: 'a>(votes: impl IntoIterator<Item = &'a Vote<T>>) -> i64 {
    votes.into_iter().map(|v| v.direction.weight()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member() -> MemberId {
        MemberId::from_string("stemmlerjs").unwrap()
    }

    fn comment() -> CommentId {
        CommentId::from_string("c1").unwrap()
    }

    #[test]
    fn test_create_upvote_and_downvote() {
        let up = CommentVote::create_upvote(member(), comment());
        assert!(up.is_upvote());
        assert!(!up.is_downvote());
        assert_eq!(up.target_id(), &comment());

        let down = CommentVote::create_downvote(member(), comment());
        assert!(down.is_downvote());
        assert!(down.is_by(&member()));
    }

    #[test]
    fn test_equality_is_by_identity() {
        let id = VoteId::from_string("v1").unwrap();
        let up = CommentVote::with_id(id.clone(), member(), comment(), VoteDirection::Upvote);
        let down = CommentVote::with_id(id, member(), comment(), VoteDirection::Downvote);
        assert_eq!(up, down);

        let a = CommentVote::create_upvote(member(), comment());
        let b = CommentVote::create_upvote(member(), comment());
        assert_ne!(a, b);
    }

    #[test]
    fn test_direction_helpers() {
        assert_eq!(VoteDirection::Upvote.opposite(), VoteDirection::Downvote);
        assert_eq!(VoteDirection::Downvote.weight(), -1);
        assert_eq!(VoteDirection::Upvote.to_string(), "upvote");
    }

    #[test]
    fn test_points() {
        let votes = vec![
            CommentVote::create_upvote(member(), comment()),
            CommentVote::create_upvote(member(), comment()),
            CommentVote::create_downvote(member(), comment()),
        ];
        assert_eq!(points(&votes), 1);
        assert_eq!(points(Vec::<&PostVote>::new()), 0);
    }

    #[test]
    fn test_vote_serialization() {
        let vote = PostVote::create_downvote(member(), PostId::from_string("p1").unwrap());
        let json = serde_json::to_string(&vote).unwrap();
        assert!(json.contains("\"direction\":\"downvote\""));
        assert!(json.contains("\"target_id\":\"p1\""));

        let back: PostVote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vote);
        assert!(back.is_downvote());
    }
}
