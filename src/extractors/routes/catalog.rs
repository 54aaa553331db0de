//! The accumulating result set of one scan.

use std::collections::HashMap;

use crate::extractors::base::{ErrorHandler, Route};

/// Ordered collections of discovered routes and error handlers.
///
/// Append-only during a scan; append order is declaration-discovery order
/// (depth-first source order). One catalog per scan, never shared across
/// scans. The identifier index mirrors registry collision semantics: the
/// ordered list keeps every appended entry, while a later registration with
/// the same (scope, identifier) key wins lookups.
#[derive(Debug, Default)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    error_handlers: Vec<ErrorHandler>,
    route_index: HashMap<(String, String), usize>,
    error_handler_index: HashMap<(String, String), usize>,
}

impl RouteCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_route(&mut self, route: Route) {
        let key = (route.owning_scope.clone(), route.identifier());
        self.route_index.insert(key, self.routes.len());
        self.routes.push(route);
    }

    pub fn append_error_handler(&mut self, handler: ErrorHandler) {
        let key = (handler.owning_scope.clone(), handler.identifier());
        self.error_handler_index.insert(key, self.error_handlers.len());
        self.error_handlers.push(handler);
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn error_handlers(&self) -> &[ErrorHandler] {
        &self.error_handlers
    }

    /// Resolve an identifier within a scope to the last-registered route.
    pub fn lookup(&self, scope: &str, identifier: &str) -> Option<&Route> {
        self.route_index
            .get(&(scope.to_string(), identifier.to_string()))
            .and_then(|&i| self.routes.get(i))
    }

    /// Resolve a reserved-handler identifier (e.g. `NOT_FOUND`) within a
    /// scope to the last-registered handler.
    pub fn lookup_error_handler(&self, scope: &str, identifier: &str) -> Option<&ErrorHandler> {
        self.error_handler_index
            .get(&(scope.to_string(), identifier.to_string()))
            .and_then(|&i| self.error_handlers.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractors::base::{HttpVerb, Visibility, NOT_FOUND_KEYWORD};

    fn route(verb: HttpVerb, path: &str, line: u32) -> Route {
        Route {
            http_verb: verb,
            http_path: path.to_string(),
            parameters: Vec::new(),
            docstring: String::new(),
            visibility: Visibility::Public,
            file_path: "app.rb".to_string(),
            line,
            owning_scope: "App".to_string(),
        }
    }

    #[test]
    fn preserves_append_order() {
        let mut catalog = RouteCatalog::new();
        catalog.append_route(route(HttpVerb::Get, "/a", 1));
        catalog.append_route(route(HttpVerb::Post, "/b", 2));
        let paths: Vec<_> = catalog.routes().iter().map(|r| r.http_path.as_str()).collect();
        assert_eq!(paths, ["/a", "/b"]);
    }

    #[test]
    fn identifier_lookup_is_last_write_wins() {
        let mut catalog = RouteCatalog::new();
        // "/a-b" and "/a.b" sanitize to the same identifier
        catalog.append_route(route(HttpVerb::Get, "/a-b", 1));
        catalog.append_route(route(HttpVerb::Get, "/a.b", 2));
        assert_eq!(catalog.routes().len(), 2);

        let found = catalog.lookup("App", "GET__a_b").unwrap();
        assert_eq!(found.http_path, "/a.b");
        assert_eq!(found.line, 2);
    }

    #[test]
    fn lookup_misses_in_other_scopes() {
        let mut catalog = RouteCatalog::new();
        catalog.append_route(route(HttpVerb::Get, "/a", 1));
        assert!(catalog.lookup("Other", "GET__a").is_none());
    }

    #[test]
    fn error_handler_lookup_is_last_write_wins() {
        let handler = |line: u32| ErrorHandler {
            http_verb: NOT_FOUND_KEYWORD.to_string(),
            docstring: String::new(),
            visibility: Visibility::Public,
            file_path: "app.rb".to_string(),
            line,
            owning_scope: "App".to_string(),
        };
        let mut catalog = RouteCatalog::new();
        catalog.append_error_handler(handler(1));
        catalog.append_error_handler(handler(5));
        assert_eq!(catalog.error_handlers().len(), 2);

        let found = catalog.lookup_error_handler("App", NOT_FOUND_KEYWORD).unwrap();
        assert_eq!(found.line, 5);
        assert!(catalog.lookup_error_handler("Other", NOT_FOUND_KEYWORD).is_none());
    }
}
