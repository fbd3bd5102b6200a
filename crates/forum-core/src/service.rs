//! Vote orchestration across the post aggregate
//!
//! [`PostService`] resolves a member's vote request against the votes that
//! member already has on the target, then applies at most one mutation to the
//! target's vote collection. See [`crate::vote::toggle`] for the rules.

use crate::comment::Comment;
use crate::member::Member;
use crate::post::Post;
use crate::vote::{apply_vote, CommentVote, PostVote, VoteChange, VoteDirection, VoteOutcome};
use tracing::{debug, warn};

/// Stateless vote-toggle service
#[derive(Debug, Clone, Copy, Default)]
pub struct PostService;

impl PostService {
    /// Create a new service
    pub fn new() -> Self {
        Self
    }

    /// Upvote a comment
    ///
    /// `existing_votes` must be the member's active votes on `comment`, as
    /// last read from storage.
    pub fn upvote_comment(
        &self,
        post: &mut Post,
        member: &Member,
        comment: &mut Comment,
        existing_votes: &[CommentVote],
    ) -> VoteOutcome {
        self.vote_on_comment(post, member, comment, existing_votes, VoteDirection::Upvote)
    }

    /// Downvote a comment
    ///
    /// An existing upvote is removed and no downvote is added in the same
    /// call.
    pub fn downvote_comment(
        &self,
        post: &mut Post,
        member: &Member,
        comment: &mut Comment,
        existing_votes: &[CommentVote],
    ) -> VoteOutcome {
        self.vote_on_comment(post, member, comment, existing_votes, VoteDirection::Downvote)
    }

    /// Upvote a post
    pub fn upvote_post(
        &self,
        post: &mut Post,
        member: &Member,
        existing_votes: &[PostVote],
    ) -> VoteOutcome {
        self.vote_on_post(post, member, existing_votes, VoteDirection::Upvote)
    }

    /// Downvote a post
    pub fn downvote_post(
        &self,
        post: &mut Post,
        member: &Member,
        existing_votes: &[PostVote],
    ) -> VoteOutcome {
        self.vote_on_post(post, member, existing_votes, VoteDirection::Downvote)
    }

    fn vote_on_comment(
        &self,
        post: &mut Post,
        member: &Member,
        comment: &mut Comment,
        existing_votes: &[CommentVote],
        direction: VoteDirection,
    ) -> VoteOutcome {
        let change =
            VoteChange::resolve(comment.id(), &member.member_id, existing_votes, direction);
        let outcome = change.apply_to(comment);

        // The post's copy gets the same change; other pending votes on it stay
        if outcome != VoteOutcome::Unchanged {
            match post.comment_mut(comment.id()) {
                Some(owned) => {
                    change.apply_to(owned);
                }
                None => warn!(
                    post = %post.id(),
                    comment = %comment.id(),
                    "Voted comment is not attached to post"
                ),
            }
        }

        debug!(
            member = %member.member_id,
            comment = %comment.id(),
            %direction,
            ?outcome,
            "Comment vote applied"
        );
        outcome
    }

    fn vote_on_post(
        &self,
        post: &mut Post,
        member: &Member,
        existing_votes: &[PostVote],
        direction: VoteDirection,
    ) -> VoteOutcome {
        let outcome = apply_vote(post, &member.member_id, existing_votes, direction);
        debug!(
            member = %member.member_id,
            post = %post.id(),
            %direction,
            ?outcome,
            "Post vote applied"
        );
        outcome
    }
}
