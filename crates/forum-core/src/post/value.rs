//! Post value objects

use crate::config::{SlugConfig, TextLimits, ValidationConfig};
use crate::error::ValidationError;
use crate::validation::TextValidator;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Validated post title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        Self::with_limits(value, ValidationConfig::default().post_title)
    }

    pub fn with_limits(value: &str, limits: TextLimits) -> Result<Self, ValidationError> {
        TextValidator::new("post title", limits)
            .validate(value)
            .map(PostTitle)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validated body of a text post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostText(String);

impl PostText {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        Self::with_limits(value, ValidationConfig::default().post_text)
    }

    pub fn with_limits(value: &str, limits: TextLimits) -> Result<Self, ValidationError> {
        TextValidator::new("post text", limits)
            .validate(value)
            .map(PostText)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Validated target of a link post (http or https only)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostLink(String);

impl PostLink {
    pub fn new(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        let invalid = |reason: String| ValidationError::InvalidUrl {
            value: value.to_string(),
            reason,
        };

        let url = Url::parse(value).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("missing host".to_string()));
        }

        Ok(PostLink(url.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Kind of post
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Text,
    Link,
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PostType::Text => write!(f, "text"),
            PostType::Link => write!(f, "link"),
        }
    }
}

/// Payload of a post; the variant decides the post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum PostContent {
    Text(PostText),
    Link(PostLink),
}

impl PostContent {
    pub fn post_type(&self) -> PostType {
        match self {
            PostContent::Text(_) => PostType::Text,
            PostContent::Link(_) => PostType::Link,
        }
    }
}

/// URL slug derived from a post title
///
/// Format: `<title hash prefix>-<lowercase words joined by '-'>`. The same
/// title and prefix length always give the same slug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostSlug(String);

impl PostSlug {
    /// Derive a slug with the default settings
    pub fn from_title(title: &PostTitle) -> Self {
        Self::from_title_with(title, &SlugConfig::default())
    }

    pub fn from_title_with(title: &PostTitle, config: &SlugConfig) -> Self {
        let hash = blake3::hash(title.as_str().as_bytes()).to_hex();
        let prefix = &hash[..config.hash_prefix_len.min(hash.len())];

        let words: String = title
            .as_str()
            .chars()
            .map(|c| if c.is_alphanumeric() { c } else { ' ' })
            .collect::<String>()
            .to_lowercase();
        let words: Vec<&str> = words.split_whitespace().collect();

        if words.is_empty() {
            PostSlug(prefix.to_string())
        } else {
            PostSlug(format!("{}-{}", prefix, words.join("-")))
        }
    }

    /// Accept a stored slug after checking its shape
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let well_formed = !value.is_empty()
            && !value.starts_with('-')
            && !value.ends_with('-')
            && !value.contains("--")
            && value
                .chars()
                .all(|c| c == '-' || (c.is_alphanumeric() && !c.is_uppercase()));

        if well_formed {
            Ok(PostSlug(value.to_string()))
        } else {
            Err(ValidationError::InvalidId {
                kind: "slug",
                value: value.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
