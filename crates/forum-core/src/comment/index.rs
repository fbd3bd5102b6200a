//! Comment tree index for parent/child lookup

use super::model::Comment;
use crate::types::CommentId;
use std::collections::{HashMap, HashSet};

/// Lookup index over a post's comment tree
///
/// Parent links are plain ids. A link to a comment the index does not know
/// about is kept as-is and simply has no node to resolve to.
#[derive(Debug, Clone, Default)]
pub struct CommentIndex {
    /// Parent of each indexed comment
    parents: HashMap<CommentId, Option<CommentId>>,
    /// Replies by parent id, in insertion order
    children: HashMap<CommentId, Vec<CommentId>>,
    /// First-level comments, in insertion order
    roots: Vec<CommentId>,
}

impl CommentIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a comment to the index
    pub fn add(&mut self, comment: &Comment) {
        if let Some(existing) = self.parents.get(comment.id()) {
            if existing.as_ref() == comment.parent_comment_id() {
                return;
            }
            self.remove(comment.id());
        }

        let parent = comment.parent_comment_id().cloned();
        match &parent {
            Some(parent_id) => self
                .children
                .entry(parent_id.clone())
                .or_default()
                .push(comment.id().clone()),
            None => self.roots.push(comment.id().clone()),
        }
        self.parents.insert(comment.id().clone(), parent);
    }

    /// Remove a comment from the index
    pub fn remove(&mut self, id: &CommentId) {
        match self.parents.remove(id) {
            Some(Some(parent_id)) => {
                if let Some(ids) = self.children.get_mut(&parent_id) {
                    ids.retain(|c| c != id);
                    if ids.is_empty() {
                        self.children.remove(&parent_id);
                    }
                }
            }
            Some(None) => self.roots.retain(|c| c != id),
            None => {}
        }
    }

    /// Check if a comment is indexed
    pub fn contains(&self, id: &CommentId) -> bool {
        self.parents.contains_key(id)
    }

    /// First-level comment ids
    pub fn roots(&self) -> &[CommentId] {
        &self.roots
    }

    /// Direct replies to a comment
    pub fn children_of(&self, id: &CommentId) -> &[CommentId] {
        self.children.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parent of a comment, if it is indexed and has one
    pub fn parent_of(&self, id: &CommentId) -> Option<&CommentId> {
        self.parents.get(id)?.as_ref()
    }

    /// Number of indexed ancestors above a comment (0 for first-level)
    ///
    /// A parent the index does not know is not counted, and neither is the
    /// link that closes a loop.
    pub fn depth_of(&self, id: &CommentId) -> Option<usize> {
        let mut current = self.parents.get(id)?;
        let mut seen: HashSet<&CommentId> = HashSet::from([id]);
        let mut depth = 0;

        while let Some(parent_id) = current {
            let Some(next) = self.parents.get(parent_id) else {
                break;
            };
            if !seen.insert(parent_id) {
                break;
            }
            depth += 1;
            current = next;
        }

        Some(depth)
    }

    /// All replies below a comment, depth first
    pub fn descendants_of(&self, id: &CommentId) -> Vec<CommentId> {
        let mut out = Vec::new();
        let mut seen: HashSet<&CommentId> = HashSet::from([id]);
        let mut stack: Vec<&CommentId> = self.children_of(id).iter().rev().collect();

        while let Some(next) = stack.pop() {
            if !seen.insert(next) {
                continue;
            }
            out.push(next.clone());
            stack.extend(self.children_of(next).iter().rev());
        }

        out
    }

    /// Number of indexed comments
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Clear the entire index
    pub fn clear(&mut self) {
        self.parents.clear();
        self.children.clear();
        self.roots.clear();
    }

    /// Rebuild index from a collection of comments
    pub fn rebuild(&mut self, comments: impl IntoIterator<Item = impl std::borrow::Borrow<Comment>>) {
        self.clear();
        for comment in comments {
            self.add(comment.borrow());
        }
    }
}
