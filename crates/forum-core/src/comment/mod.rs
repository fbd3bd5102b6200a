//! Comment module
//!
//! Comment entity, its text value object, builder and the tree index a
//! post uses to resolve parent links.

pub mod builder;
pub mod index;
pub mod model;

pub use builder::CommentBuilder;
pub use index::CommentIndex;
pub use model::*;
