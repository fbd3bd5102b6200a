//! Post builder for fluent API

use super::model::Post;
use super::value::{PostContent, PostLink, PostSlug, PostText, PostTitle};
use crate::comment::{Comment, CommentIndex};
use crate::config::ForumConfig;
use crate::error::{Result, ValidationError};
use crate::tracked::TrackedCollection;
use crate::types::{MemberId, PostId};
use crate::vote::PostVote;
use chrono::{DateTime, Utc};

/// Requested payload before validation
enum RawContent {
    Text(String),
    Link(String),
}

/// Builder for creating posts with fluent API
pub struct PostBuilder {
    id: Option<PostId>,
    member_id: MemberId,
    title: String,
    content: Option<RawContent>,
    slug: Option<String>,
    created_at: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
    votes: Vec<PostVote>,
    config: ForumConfig,
}

impl PostBuilder {
    /// Create a new builder for a post by a member
    pub fn new(member_id: MemberId, title: impl Into<String>) -> Self {
        Self {
            id: None,
            member_id,
            title: title.into(),
            content: None,
            slug: None,
            created_at: None,
            comments: Vec::new(),
            votes: Vec::new(),
            config: ForumConfig::default(),
        }
    }

    /// Use a known id instead of generating one
    pub fn id(mut self, id: PostId) -> Self {
        self.id = Some(id);
        self
    }

    /// Make this a text post
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Some(RawContent::Text(text.into()));
        self
    }

    /// Make this a link post
    pub fn link(mut self, url: impl Into<String>) -> Self {
        self.content = Some(RawContent::Link(url.into()));
        self
    }

    /// Validation and slug settings
    pub fn config(mut self, config: &ForumConfig) -> Self {
        self.config = config.clone();
        self
    }

    /// Keep a slug loaded from storage instead of deriving one
    pub fn persisted_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(slug.into());
        self
    }

    /// Set the creation time (for posts loaded from storage)
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Comments already persisted for this post
    pub fn persisted_comments(mut self, comments: impl IntoIterator<Item = Comment>) -> Self {
        self.comments.extend(comments);
        self
    }

    /// Votes already persisted for this post
    pub fn persisted_votes(mut self, votes: impl IntoIterator<Item = PostVote>) -> Self {
        self.votes.extend(votes);
        self
    }

    /// Build the post
    pub fn build(self) -> Result<Post> {
        let limits = &self.config.validation;
        let title = PostTitle::with_limits(&self.title, limits.post_title)?;

        let content = match self.content {
            Some(RawContent::Text(text)) => {
                PostContent::Text(PostText::with_limits(&text, limits.post_text)?)
            }
            Some(RawContent::Link(url)) => PostContent::Link(PostLink::new(&url)?),
            None => return Err(ValidationError::Empty { field: "post content" }.into()),
        };

        let slug = match self.slug {
            Some(stored) => PostSlug::parse(&stored)?,
            None => PostSlug::from_title_with(&title, &self.config.slug),
        };

        let mut post = Post {
            id: self.id.unwrap_or_else(PostId::generate),
            title,
            member_id: self.member_id,
            content,
            slug,
            created_at: self.created_at.unwrap_or_else(Utc::now),
            comments: TrackedCollection::from_snapshot(self.comments),
            votes: TrackedCollection::from_snapshot(self.votes),
            index: CommentIndex::new(),
        };
        post.rebuild_index();
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::CommentBuilder;
    use crate::config::TextLimits;
    use crate::error::ForumError;
    use crate::post::PostType;

    fn member() -> MemberId {
        MemberId::from_string("stemmlerjs").unwrap()
    }

    #[test]
    fn test_text_post() {
        let post = PostBuilder::new(member(), "Cool first post!")
            .text("Wow, this is a sick post!")
            .build()
            .unwrap();

        assert_eq!(post.title().as_str(), "Cool first post!");
        assert_eq!(post.post_type(), PostType::Text);
        assert_eq!(post.member_id(), &member());
        assert_eq!(post.total_comment_count(), 0);
    }

    #[test]
    fn test_link_post() {
        let post = PostBuilder::new(member(), "Read this")
            .link("https://khalilstemmler.com")
            .build()
            .unwrap();

        assert_eq!(post.post_type(), PostType::Link);
        assert!(post.link().is_some());
    }

    #[test]
    fn test_missing_content_fails() {
        let err = PostBuilder::new(member(), "Cool first post!").build().unwrap_err();
        assert!(matches!(
            err,
            ForumError::Validation(ValidationError::Empty { field: "post content" })
        ));
    }

    #[test]
    fn test_invalid_title_fails() {
        assert!(PostBuilder::new(member(), " ").text("body").build().is_err());
    }

    #[test]
    fn test_config_limits_apply() {
        let mut config = ForumConfig::default();
        config.validation.post_text = TextLimits::new(50, 100);

        let result = PostBuilder::new(member(), "Cool first post!")
            .text("too short for this forum")
            .config(&config)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_slug_derived_once() {
        let a = PostBuilder::new(member(), "Cool first post!")
            .text("body")
            .build()
            .unwrap();
        let b = PostBuilder::new(member(), "Cool first post!")
            .text("other body")
            .build()
            .unwrap();
        assert_eq!(a.slug(), b.slug());
    }

    #[test]
    fn test_persisted_slug_kept() {
        let post = PostBuilder::new(member(), "Renamed title")
            .text("body")
            .persisted_slug("1234567-original-title")
            .build()
            .unwrap();
        assert_eq!(post.slug().as_str(), "1234567-original-title");

        assert!(PostBuilder::new(member(), "Renamed title")
            .text("body")
            .persisted_slug("Not A Slug")
            .build()
            .is_err());
    }

    #[test]
    fn test_persisted_children_have_no_changes() {
        let id = PostId::from_string("p1").unwrap();
        let comment = CommentBuilder::new(id.clone(), member())
            .text("yeah")
            .build()
            .unwrap();
        let post = PostBuilder::new(member(), "Cool first post!")
            .id(id.clone())
            .text("body")
            .persisted_comments(vec![comment])
            .persisted_votes(vec![PostVote::create_upvote(member(), id)])
            .build()
            .unwrap();

        assert_eq!(post.total_comment_count(), 1);
        assert_eq!(post.first_level_comments().len(), 1);
        assert_eq!(post.points(), 1);
        assert!(!post.has_changes());
    }
}
