//! Content module - posts and categories read from the posts directory

mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use frontmatter::FrontMatter;
pub use loader::ContentRepository;
pub use markdown::MarkdownRenderer;
pub use post::{Category, Field, Post, PostSlug, SanitizedFrontMatter};
pub use post::{DEFAULT_AUTHOR, STATUS_BROKEN, STATUS_PUBLISHED};
