//! Helper functions shared by the templates, generator and server

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
