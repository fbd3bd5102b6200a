//! Configuration management for forum-core

use crate::error::{ForumError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForumConfig {
    /// Value object length limits
    pub validation: ValidationConfig,
    /// Slug derivation settings
    pub slug: SlugConfig,
}

impl ForumConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ForumError::from(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        let config: ForumConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every limit is usable
    pub fn validate(&self) -> Result<()> {
        let v = &self.validation;
        for (name, limits) in [
            ("validation.post_title", &v.post_title),
            ("validation.post_text", &v.post_text),
            ("validation.comment_text", &v.comment_text),
            ("validation.username", &v.username),
        ] {
            if limits.max == 0 {
                return Err(ForumError::Config(format!("{name}: max must be positive")));
            }
            if limits.min > limits.max {
                return Err(ForumError::Config(format!(
                    "{name}: min ({}) exceeds max ({})",
                    limits.min, limits.max
                )));
            }
        }
        if self.slug.hash_prefix_len == 0 || self.slug.hash_prefix_len > 64 {
            return Err(ForumError::Config(
                "slug.hash_prefix_len must be between 1 and 64".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inclusive character-count bounds for a text value object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLimits {
    pub min: usize,
    pub max: usize,
}

impl TextLimits {
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }
}

/// Length limits per value object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub post_title: TextLimits,
    pub post_text: TextLimits,
    pub comment_text: TextLimits,
    pub username: TextLimits,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            post_title: TextLimits::new(2, 85),
            post_text: TextLimits::new(2, 10_000),
            comment_text: TextLimits::new(2, 10_000),
            username: TextLimits::new(2, 15),
        }
    }
}

/// Slug derivation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlugConfig {
    /// Number of title-hash hex characters prefixed to the slug
    pub hash_prefix_len: usize,
}

impl Default for SlugConfig {
    fn default() -> Self {
        Self { hash_prefix_len: 7 }
    }
}
