//! Content module - documents, front-matter, markdown and posts

mod frontmatter;
pub mod loader;
pub mod markdown;
mod post;

pub use frontmatter::{FieldValue, FrontMatter, MetaValue, Product};
pub use loader::{ContentLoader, Document};
pub use post::Post;
