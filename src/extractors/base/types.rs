// Base types for route extraction
//
// All data structures for discovered routes and error handlers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved keyword registered for `not_found` handlers.
pub const NOT_FOUND_KEYWORD: &str = "NOT_FOUND";

/// The fixed verb set recognized as route declarations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
}

impl HttpVerb {
    /// Map a lowercase call name (`get`, `post`, ...) to a verb.
    pub fn from_keyword(name: &str) -> Option<Self> {
        match name {
            "get" => Some(HttpVerb::Get),
            "post" => Some(HttpVerb::Post),
            "put" => Some(HttpVerb::Put),
            "patch" => Some(HttpVerb::Patch),
            "delete" => Some(HttpVerb::Delete),
            "head" => Some(HttpVerb::Head),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Patch => "PATCH",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Head => "HEAD",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which route-declaring call form a candidate matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Verb(HttpVerb),
    NotFound,
    Namespace,
}

impl Keyword {
    pub fn from_call_name(name: &str) -> Option<Self> {
        match name {
            "not_found" => Some(Keyword::NotFound),
            "namespace" => Some(Keyword::Namespace),
            other => HttpVerb::from_keyword(other).map(Keyword::Verb),
        }
    }
}

/// Visibility of a registered object. Route declarations are always public.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Protected,
}

/// One discovered HTTP endpoint declaration.
///
/// Created once when its declaring call is visited and immutable after
/// being appended to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub http_verb: HttpVerb,
    /// Fully composed path, including any inherited namespace prefix.
    pub http_path: String,
    /// Named parameters from the path template, in order of first
    /// appearance. Empty when the template has none or failed to parse.
    pub parameters: Vec<String>,
    /// Comment block immediately preceding the declaration, markers
    /// stripped; empty when there is none.
    pub docstring: String,
    pub visibility: Visibility,
    pub file_path: String,
    /// 1-based line of the declaring call.
    pub line: u32,
    /// Qualified name of the enclosing class/module; empty at top level.
    pub owning_scope: String,
}

impl Route {
    /// Human-readable label for documentation display: `"VERB /path"`.
    /// Also serves as the declaration signature.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.http_verb, self.http_path)
    }

    /// Identifier-safe lookup key within the owning scope. Distinct paths
    /// can sanitize to the same key; the catalog resolves that collision
    /// with last-write-wins lookup semantics.
    pub fn identifier(&self) -> String {
        format!("{}_{}", self.http_verb, sanitize_identifier(&self.http_path))
    }
}

/// A reserved handler declaration (`not_found`). Not path-addressed, so it
/// carries no path or parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorHandler {
    /// Reserved keyword, e.g. `NOT_FOUND`.
    pub http_verb: String,
    pub docstring: String,
    pub visibility: Visibility,
    pub file_path: String,
    pub line: u32,
    pub owning_scope: String,
}

impl ErrorHandler {
    pub fn identifier(&self) -> String {
        self.http_verb.clone()
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`, as the
/// identifier-safe registry key requires.
pub(crate) fn sanitize_identifier(path: &str) -> String {
    path.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}
