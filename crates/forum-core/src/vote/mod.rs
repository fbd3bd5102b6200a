//! Vote module
//!
//! Vote records and the toggle rules that decide how a vote request changes
//! a target's vote collection.

pub mod model;
pub mod toggle;

pub use model::*;
pub use toggle::{apply_vote, plan_vote, Votable, VoteAction, VoteChange, VoteOutcome};
