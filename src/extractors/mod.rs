//! Extraction layers.
//!
//! `base` holds the data model and the shared tree-sitter plumbing;
//! `routes` is the Sinatra route extractor built on top of it.

pub mod base;
pub mod routes;
