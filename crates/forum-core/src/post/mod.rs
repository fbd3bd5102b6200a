//! Post module
//!
//! The post aggregate, its value objects and builder.

pub mod builder;
pub mod model;
pub mod value;

pub use builder::PostBuilder;
pub use model::Post;
pub use value::{PostContent, PostLink, PostSlug, PostText, PostTitle, PostType};
