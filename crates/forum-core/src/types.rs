//! Core type definitions for forum-core
//!
//! Ids loaded from storage keep whatever non-empty value they were stored
//! with; `generate()` produces a fresh UUID v4.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Reject empty ids and ids containing whitespace
fn check_id(kind: &'static str, value: String) -> Result<String, ValidationError> {
    if value.trim().is_empty() || value.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidId { kind, value });
    }
    Ok(value)
}

/// Identity of the account behind a member
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Generate a new account id
    pub fn generate() -> Self {
        UserId(Uuid::new_v4().to_string())
    }

    /// Create a UserId from a stored value
    pub fn from_string(s: impl Into<String>) -> Result<Self, ValidationError> {
        check_id("user", s.into()).map(UserId)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a forum member
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(String);

impl MemberId {
    /// Generate a new random id
    pub fn generate() -> Self {
        MemberId(Uuid::new_v4().to_string())
    }

    /// Create a MemberId from a stored value
    pub fn from_string(s: impl Into<String>) -> Result<Self, ValidationError> {
        check_id("member", s.into()).map(MemberId)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a post
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    /// Generate a new random id
    pub fn generate() -> Self {
        PostId(Uuid::new_v4().to_string())
    }

    /// Create a PostId from a stored value
    pub fn from_string(s: impl Into<String>) -> Result<Self, ValidationError> {
        check_id("post", s.into()).map(PostId)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a comment
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommentId(String);

impl CommentId {
    /// Generate a new random id
    pub fn generate() -> Self {
        CommentId(Uuid::new_v4().to_string())
    }

    /// Create a CommentId from a stored value
    pub fn from_string(s: impl Into<String>) -> Result<Self, ValidationError> {
        check_id("comment", s.into()).map(CommentId)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a single vote record
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoteId(String);

impl VoteId {
    /// Generate a new vote id
    pub fn generate() -> Self {
        VoteId(Uuid::new_v4().to_string())
    }

    /// Create a VoteId from a stored value
    pub fn from_string(s: impl Into<String>) -> Result<Self, ValidationError> {
        check_id("vote", s.into()).map(VoteId)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
