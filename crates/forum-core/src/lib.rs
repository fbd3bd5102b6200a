//! forum-core - Post, comment and vote aggregates
//!
//! This crate holds the consistency rules of a discussion forum post: how a
//! member's vote on a comment or post moves between no vote, upvote and
//! downvote, how those moves are recorded as additions and removals for a
//! persistence layer, and how a post's comment tree is organized and counted.
//! It performs no I/O of its own apart from loading configuration.

pub mod error;
pub mod types;
pub mod config;
pub mod validation;
pub mod tracked;
pub mod vote;
pub mod comment;
pub mod post;
pub mod member;
pub mod service;
pub mod changeset;

pub use changeset::PostChangeset;
pub use comment::{Comment, CommentBuilder, CommentText};
pub use config::ForumConfig;
pub use error::{ForumError, Result, ValidationError};
pub use member::{Member, UserName};
pub use post::{Post, PostBuilder};
pub use service::PostService;
pub use tracked::{Identified, TrackedCollection};
pub use types::*;
pub use vote::{CommentVote, PostVote, Vote, VoteDirection, VoteOutcome};
