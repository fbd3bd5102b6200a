//! Pending-change summary for a post aggregate
//!
//! [`PostChangeset`] is what a persistence layer needs after a unit of work:
//! which comments and votes to insert and which to delete. It is derived
//! from the tracked collections and does not change the post.

use crate::error::Result;
use crate::post::Post;
use crate::types::{CommentId, MemberId, PostId, VoteId};
use crate::vote::{Vote, VoteDirection};
use serde::{Deserialize, Serialize};

/// One vote row to insert or delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRecord {
    pub id: VoteId,
    pub member_id: MemberId,
    pub direction: VoteDirection,
}

impl<T> From<&Vote<T>> for VoteRecord {
    fn from(vote: &Vote<T>) -> Self {
        Self {
            id: vote.id().clone(),
            member_id: vote.member_id().clone(),
            direction: vote.direction(),
        }
    }
}

/// Vote changes on a single comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentVoteChanges {
    pub comment_id: CommentId,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_votes: Vec<VoteRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_votes: Vec<VoteRecord>,
}

/// Everything a post aggregate has pending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostChangeset {
    pub post_id: PostId,
    pub slug: String,
    pub total_comments: usize,
    pub first_level_comments: usize,
    pub points: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_comments: Vec<CommentId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_comments: Vec<CommentId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_post_votes: Vec<VoteRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed_post_votes: Vec<VoteRecord>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comment_votes: Vec<CommentVoteChanges>,
}

impl PostChangeset {
    /// Create from a post
    pub fn from_post(post: &Post) -> Self {
        let comment_votes = post
            .comments()
            .iter()
            .filter(|c| c.votes().has_changes())
            .map(|c| CommentVoteChanges {
                comment_id: c.id().clone(),
                points: c.points(),
                new_votes: c.votes().new_items().into_iter().map(VoteRecord::from).collect(),
                removed_votes: c.votes().removed_items().iter().map(VoteRecord::from).collect(),
            })
            .collect();

        Self {
            post_id: post.id().clone(),
            slug: post.slug().to_string(),
            total_comments: post.total_comment_count(),
            first_level_comments: post.first_level_comment_count(),
            points: post.points(),
            new_comments: post
                .comments()
                .new_items()
                .into_iter()
                .map(|c| c.id().clone())
                .collect(),
            removed_comments: post
                .comments()
                .removed_items()
                .iter()
                .map(|c| c.id().clone())
                .collect(),
            new_post_votes: post.votes().new_items().into_iter().map(VoteRecord::from).collect(),
            removed_post_votes: post.votes().removed_items().iter().map(VoteRecord::from).collect(),
            comment_votes,
        }
    }

    /// Check if there is nothing to persist
    pub fn is_empty(&self) -> bool {
        self.new_comments.is_empty()
            && self.removed_comments.is_empty()
            && self.new_post_votes.is_empty()
            && self.removed_post_votes.is_empty()
            && self.comment_votes.is_empty()
    }

    /// Serialize to JSON
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentBuilder;
    use crate::member::{Member, UserName};
    use crate::post::PostBuilder;
    use crate::service::PostService;
    use crate::types::UserId;
    use crate::vote::PostVote;
    use pretty_assertions::assert_eq;

    fn member() -> Member {
        Member::new(
            MemberId::from_string("stemmlerjs").unwrap(),
            UserId::from_string("stemmlerjs").unwrap(),
            UserName::new("stemmlerjs").unwrap(),
        )
    }

    fn create_test_post() -> Post {
        PostBuilder::new(member().member_id, "Cool first post!")
            .id(PostId::from_string("p1").unwrap())
            .text("Wow, this is a sick post!")
            .build()
            .unwrap()
    }

    #[test]
    fn test_empty_changeset() {
        let changeset = PostChangeset::from_post(&create_test_post());
        assert!(changeset.is_empty());
        assert_eq!(changeset.total_comments, 0);
    }

    #[test]
    fn test_changeset_after_downvote() {
        let stemmlerjs = member();
        let mut post = create_test_post();
        let mut comment = CommentBuilder::new(post.id().clone(), stemmlerjs.member_id.clone())
            .id(CommentId::from_string("c1").unwrap())
            .text("yeah")
            .build()
            .unwrap();
        post.add_comment(comment.clone());
        PostService::new().downvote_comment(&mut post, &stemmlerjs, &mut comment, &[]);

        let changeset = PostChangeset::from_post(&post);
        assert_eq!(changeset.new_comments, vec![CommentId::from_string("c1").unwrap()]);
        assert_eq!(changeset.comment_votes.len(), 1);

        let votes = &changeset.comment_votes[0];
        assert_eq!(votes.points, -1);
        assert_eq!(votes.new_votes.len(), 1);
        assert_eq!(votes.new_votes[0].direction, VoteDirection::Downvote);
        assert!(votes.removed_votes.is_empty());
    }

    #[test]
    fn test_changeset_records_removed_post_vote() {
        let stemmlerjs = member();
        let mut post = create_test_post();
        let existing = vec![PostVote::create_upvote(
            stemmlerjs.member_id.clone(),
            post.id().clone(),
        )];
        PostService::new().downvote_post(&mut post, &stemmlerjs, &existing);

        let changeset = PostChangeset::from_post(&post);
        assert_eq!(changeset.removed_post_votes, vec![VoteRecord::from(&existing[0])]);
        assert!(changeset.new_post_votes.is_empty());
        assert!(!changeset.is_empty());
    }

    #[test]
    fn test_json_output() {
        let changeset = PostChangeset::from_post(&create_test_post());
        let json = changeset.to_json(false).unwrap();
        assert!(json.contains("\"post_id\":\"p1\""));
        assert!(!json.contains("new_comments"));

        let back: PostChangeset = serde_json::from_str(&json).unwrap();
        assert_eq!(back, changeset);
    }
}
