//! Content module - article store, front-matter and Markdown processing

mod article;
mod error;
mod frontmatter;
mod markdown;
mod store;

pub use article::Article;
pub use error::LoadError;
pub use frontmatter::{parse_date_string, FrontMatter, FrontMatterError, FrontValue};
pub use markdown::{plain_text, MarkdownRenderer};
pub use store::ArticleStore;
pub(crate) use store::validate_slug;
