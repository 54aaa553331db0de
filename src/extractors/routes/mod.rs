//! Sinatra route extraction.
//!
//! One extraction algorithm, two front ends. The tree front end walks a
//! tree-sitter AST; the legacy token front end scans lines with a
//! leading-token matcher. Both surface recognized calls as [`Candidate`]s,
//! so gating, prefix composition and catalog appends exist exactly once.

pub mod catalog;
pub mod prefix;
pub mod scopes;

mod helpers;
pub(crate) mod tokens;
pub(crate) mod tree;

use tracing::{debug, warn};

use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::extractors::base::{ErrorHandler, Keyword, Route, Visibility, NOT_FOUND_KEYWORD};
use crate::pattern::PathPattern;
use catalog::RouteCatalog;
use prefix::PrefixStack;
use scopes::{ScopeGraph, ScopeId, ScopeResolution};

/// Receiver form of a candidate call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Receiver {
    Implicit,
    SelfReceiver,
    Named(String),
}

/// One recognized route-declaring call, abstracted over the input mode.
pub(crate) trait Candidate {
    fn keyword(&self) -> Keyword;
    /// Raw path literal of this call only (no inherited prefix), quotes
    /// stripped, `""` when absent.
    fn raw_path(&self) -> String;
    fn receiver(&self) -> Receiver;
    fn inside_instance_method(&self) -> bool;
    fn docstring(&self) -> Option<String>;
    fn line(&self) -> u32;
    /// Feed candidates nested in this call's block back to the engine.
    /// Invoked for namespace candidates only.
    fn each_nested(
        &self,
        engine: &mut RouteExtractionEngine<'_>,
        scope: ScopeId,
    ) -> Result<(), ScanError>;
}

/// Applies the scope gates to each candidate, composes paths through the
/// prefix stack and appends results to the catalog.
///
/// One engine per scan. The prefix stack and catalog are instance state, so
/// concurrent scans never contaminate each other.
pub(crate) struct RouteExtractionEngine<'a> {
    options: &'a ScanOptions,
    scopes: &'a ScopeGraph,
    file_path: &'a str,
    prefixes: PrefixStack,
    catalog: RouteCatalog,
}

impl<'a> RouteExtractionEngine<'a> {
    pub(crate) fn new(options: &'a ScanOptions, scopes: &'a ScopeGraph, file_path: &'a str) -> Self {
        Self {
            options,
            scopes,
            file_path,
            prefixes: PrefixStack::new(),
            catalog: RouteCatalog::new(),
        }
    }

    pub(crate) fn into_catalog(self) -> RouteCatalog {
        self.catalog
    }

    pub(crate) fn process(
        &mut self,
        candidate: &dyn Candidate,
        scope: ScopeId,
    ) -> Result<(), ScanError> {
        if !self.options.enable_all && !self.gates_pass(candidate, scope) {
            debug!(
                file = self.file_path,
                line = candidate.line(),
                "candidate skipped by scope gates"
            );
            return Ok(());
        }

        match candidate.keyword() {
            Keyword::Namespace => {
                // The raw segment goes on the stack; composition with
                // ancestor prefixes happens when a nested route asks for
                // the current prefix.
                self.prefixes.push(candidate.raw_path());
                candidate.each_nested(self, scope)?;
                self.prefixes.pop()?;
            }
            Keyword::NotFound => {
                let handler = ErrorHandler {
                    http_verb: NOT_FOUND_KEYWORD.to_string(),
                    docstring: candidate.docstring().unwrap_or_default(),
                    visibility: Visibility::Public,
                    file_path: self.file_path.to_string(),
                    line: candidate.line(),
                    owning_scope: self.scopes.qualified_name(scope).to_string(),
                };
                self.catalog.append_error_handler(handler);
            }
            Keyword::Verb(verb) => {
                let http_path = format!("{}{}", self.prefixes.current(), candidate.raw_path());
                let parameters = match PathPattern::parse(&http_path) {
                    Ok(pattern) => pattern.into_parameters(),
                    Err(err) => {
                        // Recoverable: the route is still registered,
                        // extraction of later routes is unaffected.
                        warn!(
                            file = self.file_path,
                            line = candidate.line(),
                            %err,
                            "route registered without parameters"
                        );
                        Vec::new()
                    }
                };
                let route = Route {
                    http_verb: verb,
                    http_path,
                    parameters,
                    docstring: candidate.docstring().unwrap_or_default(),
                    visibility: Visibility::Public,
                    file_path: self.file_path.to_string(),
                    line: candidate.line(),
                    owning_scope: self.scopes.qualified_name(scope).to_string(),
                };
                self.catalog.append_route(route);
            }
        }
        Ok(())
    }

    fn gates_pass(&self, candidate: &dyn Candidate, scope: ScopeId) -> bool {
        self.outside_sinatra_base_pass(scope)
            && self.unknown_namespace_pass(candidate, scope)
            && self.instance_method_pass(candidate)
    }

    fn outside_sinatra_base_pass(&self, scope: ScopeId) -> bool {
        self.options.enable_outside_sinatra_base || self.scopes.descends_from_sinatra_base(scope)
    }

    fn unknown_namespace_pass(&self, candidate: &dyn Candidate, scope: ScopeId) -> bool {
        if self.options.enable_unknown_namespaces {
            return true;
        }
        match candidate.receiver() {
            Receiver::Implicit | Receiver::SelfReceiver => true,
            Receiver::Named(name) => match self.scopes.resolve(scope, &name) {
                ScopeResolution::Resolved(target) => self.outside_sinatra_base_pass(target),
                // Expected and common; skip silently.
                ScopeResolution::Unresolved => false,
            },
        }
    }

    fn instance_method_pass(&self, candidate: &dyn Candidate) -> bool {
        self.options.enable_instance_methods || !candidate.inside_instance_method()
    }
}
