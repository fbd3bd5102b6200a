//! Forum member

use crate::config::{TextLimits, ValidationConfig};
use crate::error::ValidationError;
use crate::types::{MemberId, UserId};
use crate::validation::TextValidator;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated display name of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserName(String);

impl UserName {
    /// Validate with the default limits
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        Self::with_limits(value, ValidationConfig::default().username)
    }

    /// Validate with explicit limits
    pub fn with_limits(value: &str, limits: TextLimits) -> Result<Self, ValidationError> {
        TextValidator::new("username", limits)
            .validate(value)
            .map(UserName)
    }

    /// Get the string value
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A member acting on posts and comments
///
/// Votes and comments are recorded against `member_id`. `user_id` is the
/// account the member belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub member_id: MemberId,
    pub user_id: UserId,
    pub username: UserName,
}

impl Member {
    /// Create a new member
    pub fn new(member_id: MemberId, user_id: UserId, username: UserName) -> Self {
        Self {
            member_id,
            user_id,
            username,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_validation() {
        assert_eq!(UserName::new("stemmlerjs").unwrap().as_str(), "stemmlerjs");
        assert!(UserName::new("a").is_err());
        assert!(UserName::new("a-very-long-username").is_err());
    }

    #[test]
    fn test_member_creation() {
        let member = Member::new(
            MemberId::from_string("m-billybob").unwrap(),
            UserId::from_string("billybob").unwrap(),
            UserName::new("billybob").unwrap(),
        );
        assert_eq!(member.member_id.as_str(), "m-billybob");
        assert_eq!(member.user_id.as_str(), "billybob");
        assert_eq!(member.username.to_string(), "billybob");
    }
}
