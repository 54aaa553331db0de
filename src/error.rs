//! Error taxonomy for route extraction.
//!
//! Recoverable conditions stay out of `ScanError`: a malformed path
//! template is caught at the route-processing boundary and the route is
//! still registered (minus parameters), and an unresolvable receiver is a
//! plain gate failure, not an error.

use thiserror::Error;

/// Malformed path template.
///
/// Raised by [`crate::pattern::PathPattern::parse`] and caught per route by
/// the extraction engine, which logs it and registers the route with an
/// empty parameter list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed path template '{template}': {reason}")]
pub struct PatternParseError {
    pub template: String,
    pub reason: String,
}

/// Scan-fatal errors. Anything here aborts the current scan.
#[derive(Debug, Error)]
pub enum ScanError {
    /// `pop()` on an empty prefix stack. This is a traversal bug
    /// (mismatched push/pop), not a user-input problem, so the scan fails
    /// loudly rather than silently corrupting later path composition.
    #[error("prefix stack underflow while leaving a namespace block")]
    StackDiscipline,
}
