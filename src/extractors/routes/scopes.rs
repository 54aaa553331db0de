//! Lexical scope tracking for gate checks.
//!
//! Both front ends record class/module declarations here before extraction
//! starts, so the gates can answer two questions statically: does a scope's
//! inheritance chain reach `Sinatra::Base`, and what does a receiver
//! constant resolve to from a given scope. Resolution is within-file only;
//! names that point outside the file stay as written in source.

pub type ScopeId = usize;

/// The implicit top-level scope.
pub const ROOT_SCOPE: ScopeId = 0;

/// Name the framework base class is recognized by.
pub const SINATRA_BASE: &str = "Sinatra::Base";

/// Outcome of a static receiver lookup. Failing to resolve is expected and
/// common, so it is a value the gates consume, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeResolution {
    Resolved(ScopeId),
    Unresolved,
}

#[derive(Debug)]
struct Scope {
    /// `Outer::Inner` style name; empty for the root scope.
    qualified: String,
    parent: Option<ScopeId>,
    /// Superclass reference as written in source, classes only.
    superclass: Option<String>,
}

#[derive(Debug)]
pub struct ScopeGraph {
    scopes: Vec<Scope>,
}

impl Default for ScopeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeGraph {
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                qualified: String::new(),
                parent: None,
                superclass: None,
            }],
        }
    }

    pub fn add(&mut self, parent: ScopeId, name: &str, superclass: Option<String>) -> ScopeId {
        let qualified = if self.scopes[parent].qualified.is_empty() {
            name.to_string()
        } else {
            format!("{}::{}", self.scopes[parent].qualified, name)
        };
        self.scopes.push(Scope {
            qualified,
            parent: Some(parent),
            superclass,
        });
        self.scopes.len() - 1
    }

    pub fn qualified_name(&self, id: ScopeId) -> &str {
        &self.scopes[id].qualified
    }

    /// Ancestor names from the scope outward, as written in source.
    /// Superclasses declared in the same file are followed transitively;
    /// the final entry may be an external name such as `Sinatra::Base`.
    pub fn inheritance_chain(&self, id: ScopeId) -> Vec<String> {
        let mut chain = vec![self.scopes[id].qualified.clone()];
        let mut current = id;
        // bounded in case of superclass cycles
        for _ in 0..32 {
            let Some(superclass) = self.scopes[current].superclass.clone() else {
                break;
            };
            let declared_in = self.scopes[current].parent.unwrap_or(ROOT_SCOPE);
            match self.resolve(declared_in, &superclass) {
                ScopeResolution::Resolved(next) if next != current => {
                    chain.push(self.scopes[next].qualified.clone());
                    current = next;
                }
                _ => {
                    chain.push(superclass);
                    break;
                }
            }
        }
        chain
    }

    pub fn descends_from_sinatra_base(&self, id: ScopeId) -> bool {
        self.inheritance_chain(id).iter().any(|name| name == SINATRA_BASE)
    }

    /// Lexical resolution of a constant reference: innermost enclosing
    /// scope first, then outward to the top level.
    pub fn resolve(&self, from: ScopeId, name: &str) -> ScopeResolution {
        let mut ancestor = Some(from);
        while let Some(id) = ancestor {
            let candidate = if self.scopes[id].qualified.is_empty() {
                name.to_string()
            } else {
                format!("{}::{}", self.scopes[id].qualified, name)
            };
            if let Some(found) = self.find(&candidate) {
                return ScopeResolution::Resolved(found);
            }
            ancestor = self.scopes[id].parent;
        }
        ScopeResolution::Unresolved
    }

    fn find(&self, qualified: &str) -> Option<ScopeId> {
        self.scopes.iter().position(|s| s.qualified == qualified)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inheritance_chain_follows_local_superclasses() {
        let mut graph = ScopeGraph::new();
        let api = graph.add(ROOT_SCOPE, "Api", Some(SINATRA_BASE.to_string()));
        let admin = graph.add(ROOT_SCOPE, "Admin", Some("Api".to_string()));

        assert_eq!(graph.inheritance_chain(api), ["Api", SINATRA_BASE]);
        assert_eq!(graph.inheritance_chain(admin), ["Admin", "Api", SINATRA_BASE]);
        assert!(graph.descends_from_sinatra_base(admin));
    }

    #[test]
    fn unrelated_scopes_do_not_descend_from_the_base() {
        let mut graph = ScopeGraph::new();
        let other = graph.add(ROOT_SCOPE, "Other", None);
        assert_eq!(graph.inheritance_chain(other), ["Other"]);
        assert!(!graph.descends_from_sinatra_base(other));
        assert!(!graph.descends_from_sinatra_base(ROOT_SCOPE));
    }

    #[test]
    fn resolution_walks_outward_from_the_innermost_scope() {
        let mut graph = ScopeGraph::new();
        let outer = graph.add(ROOT_SCOPE, "Outer", None);
        let inner = graph.add(outer, "Inner", None);
        let sibling = graph.add(outer, "Sibling", None);

        assert_eq!(graph.resolve(inner, "Sibling"), ScopeResolution::Resolved(sibling));
        assert_eq!(graph.resolve(inner, "Outer"), ScopeResolution::Resolved(outer));
        assert_eq!(
            graph.resolve(ROOT_SCOPE, "Outer::Inner"),
            ScopeResolution::Resolved(inner)
        );
        assert_eq!(graph.resolve(inner, "Mystery"), ScopeResolution::Unresolved);
    }

    #[test]
    fn superclass_cycles_terminate() {
        let mut graph = ScopeGraph::new();
        let a = graph.add(ROOT_SCOPE, "A", Some("B".to_string()));
        let _b = graph.add(ROOT_SCOPE, "B", Some("A".to_string()));
        // must not hang or overflow
        assert!(!graph.descends_from_sinatra_base(a));
    }
}
