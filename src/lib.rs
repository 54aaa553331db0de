// Routemap - static Sinatra route extraction
//
// Scans Ruby source for route-declaring calls (verb + path), nested
// `namespace` prefix groups and `not_found` handlers without executing the
// application. Tree-sitter provides the syntax tree; the extraction engine
// applies scope gates and path composition; the catalog holds the results.

pub mod config;
pub mod error;
pub mod extractors;
pub mod language;
pub mod pattern;
pub mod scanner;

pub use config::ScanOptions;
pub use error::{PatternParseError, ScanError};
pub use extractors::base::{ErrorHandler, HttpVerb, Route, Visibility, NOT_FOUND_KEYWORD};
pub use extractors::routes::catalog::RouteCatalog;
pub use pattern::PathPattern;
pub use scanner::RouteScanner;
