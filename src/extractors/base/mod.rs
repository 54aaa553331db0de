// Shared extraction plumbing
//
// Data structures for discovered routes plus the node-level helpers every
// front end needs (text, doc comments, locations).

mod extractor;
mod types;

pub use extractor::{clean_comment_line, BaseExtractor};
pub use types::{ErrorHandler, HttpVerb, Keyword, Route, Visibility, NOT_FOUND_KEYWORD};
