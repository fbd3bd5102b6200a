//! Post aggregate

use super::value::{PostContent, PostLink, PostSlug, PostText, PostTitle, PostType};
use crate::comment::{Comment, CommentIndex};
use crate::tracked::TrackedCollection;
use crate::types::{CommentId, MemberId, PostId};
use crate::vote::{self, PostVote, Votable};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A forum post and everything it owns
///
/// Comments and post votes live in tracked collections so a persistence
/// layer can write only what changed. Comment counts are always computed
/// from the live comments, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub(crate) id: PostId,
    pub(crate) title: PostTitle,
    pub(crate) member_id: MemberId,
    pub(crate) content: PostContent,
    pub(crate) slug: PostSlug,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) comments: TrackedCollection<Comment>,
    pub(crate) votes: TrackedCollection<PostVote>,
    #[serde(skip)]
    pub(crate) index: CommentIndex,
}

impl Post {
    /// Get the post ID
    pub fn id(&self) -> &PostId {
        &self.id
    }

    /// Get the title
    pub fn title(&self) -> &PostTitle {
        &self.title
    }

    /// Author of the post
    pub fn member_id(&self) -> &MemberId {
        &self.member_id
    }

    /// Text body or link
    pub fn content(&self) -> &PostContent {
        &self.content
    }

    /// Whether this is a text or link post
    pub fn post_type(&self) -> PostType {
        self.content.post_type()
    }

    /// Body of a text post
    pub fn text(&self) -> Option<&PostText> {
        match &self.content {
            PostContent::Text(text) => Some(text),
            PostContent::Link(_) => None,
        }
    }

    /// Target of a link post
    pub fn link(&self) -> Option<&PostLink> {
        match &self.content {
            PostContent::Link(link) => Some(link),
            PostContent::Text(_) => None,
        }
    }

    /// Get the URL slug
    pub fn slug(&self) -> &PostSlug {
        &self.slug
    }

    /// When the post was created
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Loaded comments with their pending changes
    pub fn comments(&self) -> &TrackedCollection<Comment> {
        &self.comments
    }

    /// Attach a comment
    ///
    /// Parent ids are taken as given; no cycle or existence check is done.
    pub fn add_comment(&mut self, comment: Comment) {
        debug!(post = %self.id, comment = %comment.id(), "Adding comment");
        self.index.add(&comment);
        self.comments.add(comment);
    }

    /// Replace the owned copy of a comment with an updated one
    pub fn update_comment(&mut self, comment: Comment) {
        self.index.add(&comment);
        self.comments.add(comment);
    }

    /// Get a comment by id
    pub fn comment(&self, id: &CommentId) -> Option<&Comment> {
        self.comments.get(id)
    }

    pub(crate) fn comment_mut(&mut self, id: &CommentId) -> Option<&mut Comment> {
        self.comments.get_mut(id)
    }

    /// Number of live comments at every depth
    pub fn total_comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Number of live comments that reply directly to the post
    pub fn first_level_comment_count(&self) -> usize {
        self.comments.iter().filter(|c| c.is_first_level()).count()
    }

    /// First-level comments in insertion order
    pub fn first_level_comments(&self) -> Vec<&Comment> {
        self.resolve(self.index.roots())
    }

    /// Direct replies to a comment
    pub fn replies_to(&self, id: &CommentId) -> Vec<&Comment> {
        self.resolve(self.index.children_of(id))
    }

    /// Number of ancestors of a comment (0 for first-level)
    ///
    /// Unknown parents and the link that closes a loop are not counted.
    pub fn depth_of(&self, id: &CommentId) -> Option<usize> {
        self.index.depth_of(id)
    }

    /// Every reply below a comment, depth first
    pub fn thread(&self, id: &CommentId) -> Vec<&Comment> {
        self.resolve(&self.index.descendants_of(id))
    }

    fn resolve(&self, ids: &[CommentId]) -> Vec<&Comment> {
        ids.iter().filter_map(|id| self.comments.get(id)).collect()
    }

    /// Loaded post votes with their pending changes
    pub fn votes(&self) -> &TrackedCollection<PostVote> {
        &self.votes
    }

    /// Active votes cast by one member
    pub fn votes_by(&self, member_id: &MemberId) -> Vec<PostVote> {
        self.votes
            .iter()
            .filter(|v| v.is_by(member_id))
            .cloned()
            .collect()
    }

    /// Record a vote on the post
    pub fn add_vote(&mut self, vote: PostVote) {
        self.votes.add(vote);
    }

    /// Retract a vote on the post
    pub fn remove_vote(&mut self, vote: &PostVote) {
        self.votes.remove(vote);
    }

    /// Upvotes minus downvotes among the loaded post votes
    pub fn points(&self) -> i64 {
        vote::points(&self.votes)
    }

    /// Check if the aggregate has anything to persist
    pub fn has_changes(&self) -> bool {
        self.comments.has_changes()
            || self.votes.has_changes()
            || self.comments.iter().any(|c| c.votes().has_changes())
    }

    /// Accept all pending changes as persisted
    pub fn commit(&mut self) {
        self.comments.commit();
        self.votes.commit();
        for comment in self.comments.iter_mut() {
            comment.votes.commit();
        }
    }

    /// Rebuild the comment index (after deserialization)
    pub fn rebuild_index(&mut self) {
        self.index.rebuild(self.comments.iter());
    }
}

impl Votable for Post {
    type Target = PostId;

    fn vote_target(&self) -> &PostId {
        &self.id
    }

    fn add_vote(&mut self, vote: PostVote) {
        Post::add_vote(self, vote);
    }

    fn remove_vote(&mut self, vote: &PostVote) {
        Post::remove_vote(self, vote);
    }
}

// Custom deserialization to rebuild index
impl<'de> Deserialize<'de> for Post {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::de::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct PostHelper {
            id: PostId,
            title: PostTitle,
            member_id: MemberId,
            content: PostContent,
            slug: PostSlug,
            created_at: DateTime<Utc>,
            #[serde(default)]
            comments: TrackedCollection<Comment>,
            #[serde(default)]
            votes: TrackedCollection<PostVote>,
        }

        let helper = PostHelper::deserialize(deserializer)?;
        let mut post = Post {
            id: helper.id,
            title: helper.title,
            member_id: helper.member_id,
            content: helper.content,
            slug: helper.slug,
            created_at: helper.created_at,
            comments: helper.comments,
            votes: helper.votes,
            index: CommentIndex::new(),
        };
        post.rebuild_index();
        Ok(post)
    }
}
