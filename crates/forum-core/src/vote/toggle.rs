//! Vote toggle rules
//!
//! A vote request is resolved against the member's currently active votes on
//! the target:
//!
//! | existing vote      | result                                   |
//! |--------------------|------------------------------------------|
//! | none               | add a vote in the requested direction    |
//! | same direction     | nothing                                  |
//! | opposite direction | remove it, and add nothing in this call  |
//!
//! Asking for the opposite direction clears the vote back to neutral. A
//! second request is needed to install the new direction.

use super::model::{Vote, VoteDirection};
use crate::types::MemberId;
use serde::{Deserialize, Serialize};

/// Something members can vote on
pub trait Votable {
    /// Id type stored on the target's votes
    type Target: Clone;

    /// Id recorded on new votes for this target
    fn vote_target(&self) -> &Self::Target;

    fn add_vote(&mut self, vote: Vote<Self::Target>);

    fn remove_vote(&mut self, vote: &Vote<Self::Target>);
}

/// The single mutation a vote request resolves to
#[derive(Debug, PartialEq, Eq)]
pub enum VoteAction<'a, T> {
    /// Record a new vote in this direction
    Add(VoteDirection),
    /// Remove this opposite-direction vote
    Remove(&'a Vote<T>),
    /// Already voted this way
    Keep,
}

/// What a vote request did to the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteOutcome {
    Added,
    Removed,
    Unchanged,
}

/// Decide what a request does, given the member's active votes on the target
///
/// `existing` is expected to hold only the acting member's active votes on
/// this target, typically zero or one.
pub fn plan_vote<T>(existing: &[Vote<T>], requested: VoteDirection) -> VoteAction<'_, T> {
    if existing.iter().any(|v| v.direction() == requested) {
        return VoteAction::Keep;
    }
    match existing.iter().find(|v| v.direction() == requested.opposite()) {
        Some(opposite) => VoteAction::Remove(opposite),
        None => VoteAction::Add(requested),
    }
}

/// A resolved vote request
///
/// Unlike [`VoteAction`] it owns the vote it adds or removes, so the same
/// change can be applied to several copies of one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteChange<T> {
    Add(Vote<T>),
    Remove(Vote<T>),
    Keep,
}

impl<T: Clone> VoteChange<T> {
    /// Resolve a request for `member_id` on the target `target_id`
    pub fn resolve(
        target_id: &T,
        member_id: &MemberId,
        existing: &[Vote<T>],
        requested: VoteDirection,
    ) -> Self {
        match plan_vote(existing, requested) {
            VoteAction::Keep => VoteChange::Keep,
            VoteAction::Remove(vote) => VoteChange::Remove(vote.clone()),
            VoteAction::Add(direction) => {
                VoteChange::Add(Vote::new(member_id.clone(), target_id.clone(), direction))
            }
        }
    }

    /// Outcome this change reports
    pub fn outcome(&self) -> VoteOutcome {
        match self {
            VoteChange::Add(_) => VoteOutcome::Added,
            VoteChange::Remove(_) => VoteOutcome::Removed,
            VoteChange::Keep => VoteOutcome::Unchanged,
        }
    }

    /// Apply the change to one copy of the target
    pub fn apply_to<V: Votable<Target = T>>(&self, target: &mut V) -> VoteOutcome {
        match self {
            VoteChange::Add(vote) => target.add_vote(vote.clone()),
            VoteChange::Remove(vote) => target.remove_vote(vote),
            VoteChange::Keep => {}
        }
        self.outcome()
    }
}

/// Apply a vote request to a target
pub fn apply_vote<V: Votable>(
    target: &mut V,
    member_id: &MemberId,
    existing: &[Vote<V::Target>],
    requested: VoteDirection,
) -> VoteOutcome {
    VoteChange::resolve(target.vote_target(), member_id, existing, requested).apply_to(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracked::TrackedCollection;
    use crate::types::CommentId;
    use crate::vote::model::CommentVote;

    struct Target {
        id: CommentId,
        votes: TrackedCollection<CommentVote>,
    }

    impl Votable for Target {
        type Target = CommentId;

        fn vote_target(&self) -> &CommentId {
            &self.id
        }

        fn add_vote(&mut self, vote: CommentVote) {
            self.votes.add(vote);
        }

        fn remove_vote(&mut self, vote: &CommentVote) {
            self.votes.remove(vote);
        }
    }

    fn member() -> MemberId {
        MemberId::from_string("m1").unwrap()
    }

    fn target() -> Target {
        Target {
            id: CommentId::from_string("c1").unwrap(),
            votes: TrackedCollection::new(),
        }
    }

    #[test]
    fn test_plan_without_votes_adds() {
        let existing: Vec<CommentVote> = vec![];
        assert_eq!(
            plan_vote(&existing, VoteDirection::Upvote),
            VoteAction::Add(VoteDirection::Upvote)
        );
    }

    #[test]
    fn test_plan_same_direction_keeps() {
        let existing = vec![CommentVote::create_downvote(member(), target().id)];
        assert_eq!(plan_vote(&existing, VoteDirection::Downvote), VoteAction::Keep);
    }

    #[test]
    fn test_plan_opposite_direction_removes() {
        let existing = vec![CommentVote::create_upvote(member(), target().id)];
        assert_eq!(
            plan_vote(&existing, VoteDirection::Downvote),
            VoteAction::Remove(&existing[0])
        );
    }

    #[test]
    fn test_apply_add_uses_target_id() {
        let mut t = target();
        let outcome = apply_vote(&mut t, &member(), &[], VoteDirection::Upvote);

        assert_eq!(outcome, VoteOutcome::Added);
        let vote = &t.votes.items()[0];
        assert_eq!(vote.target_id(), &t.id);
        assert!(vote.is_by(&member()));
    }

    #[test]
    fn test_apply_opposite_only_removes() {
        let mut t = target();
        let upvote = CommentVote::create_upvote(member(), t.id.clone());
        t.votes = TrackedCollection::from_snapshot(vec![upvote.clone()]);

        let outcome = apply_vote(&mut t, &member(), &[upvote], VoteDirection::Downvote);

        assert_eq!(outcome, VoteOutcome::Removed);
        assert!(t.votes.is_empty());
        assert_eq!(t.votes.removed_items().len(), 1);
        assert!(t.votes.new_items().is_empty());
    }

    #[test]
    fn test_change_applies_same_vote_to_each_copy() {
        let mut first = target();
        let mut second = target();
        let change = VoteChange::resolve(&first.id, &member(), &[], VoteDirection::Downvote);

        assert_eq!(change.apply_to(&mut first), VoteOutcome::Added);
        assert_eq!(change.apply_to(&mut second), VoteOutcome::Added);
        assert_eq!(first.votes.items()[0].id(), second.votes.items()[0].id());
    }

    #[test]
    fn test_keep_change_touches_nothing() {
        let mut t = target();
        let existing = vec![CommentVote::create_upvote(member(), t.id.clone())];
        let change = VoteChange::resolve(&t.id, &member(), &existing, VoteDirection::Upvote);

        assert_eq!(change, VoteChange::Keep);
        assert_eq!(change.apply_to(&mut t), VoteOutcome::Unchanged);
        assert!(!t.votes.has_changes());
    }
}
