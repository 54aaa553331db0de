//! Tree-sitter front end: candidate discovery over a Ruby AST.

use std::collections::HashMap;

use tree_sitter::{Node, Tree};

use super::catalog::RouteCatalog;
use super::scopes::{ScopeGraph, ScopeId, ROOT_SCOPE};
use super::{helpers, Candidate, Receiver, RouteExtractionEngine};
use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::extractors::base::{BaseExtractor, Keyword};

pub(crate) fn extract(
    base: &BaseExtractor,
    tree: &Tree,
    options: &ScanOptions,
) -> Result<RouteCatalog, ScanError> {
    let (scopes, declarations) = collect_scopes(base, tree.root_node());
    let mut engine = RouteExtractionEngine::new(options, &scopes, &base.file_path);
    let walker = TreeWalk {
        base,
        declarations: &declarations,
    };
    walker.walk(tree.root_node(), ROOT_SCOPE, &mut engine)?;
    Ok(engine.into_catalog())
}

/// First pass: record every class/module declaration so the gates can
/// resolve receivers and inheritance chains before any candidate is
/// processed.
fn collect_scopes(base: &BaseExtractor, root: Node) -> (ScopeGraph, HashMap<usize, ScopeId>) {
    let mut graph = ScopeGraph::new();
    let mut declarations = HashMap::new();
    collect_scopes_into(base, root, ROOT_SCOPE, &mut graph, &mut declarations);
    (graph, declarations)
}

fn collect_scopes_into(
    base: &BaseExtractor,
    node: Node,
    parent: ScopeId,
    graph: &mut ScopeGraph,
    declarations: &mut HashMap<usize, ScopeId>,
) {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if matches!(child.kind(), "class" | "module") {
            let name = scope_name(base, &child);
            let superclass = if child.kind() == "class" {
                superclass_name(base, &child)
            } else {
                None
            };
            let id = graph.add(parent, &name, superclass);
            declarations.insert(child.id(), id);
            collect_scopes_into(base, child, id, graph, declarations);
        } else {
            collect_scopes_into(base, child, parent, graph, declarations);
        }
    }
}

fn scope_name(base: &BaseExtractor, node: &Node) -> String {
    node.child_by_field_name("name")
        .or_else(|| node.child_by_field_name("constant"))
        .map(|name| base.get_node_text(&name))
        .unwrap_or_else(|| "UnknownScope".to_string())
}

fn superclass_name(base: &BaseExtractor, node: &Node) -> Option<String> {
    let superclass = node.child_by_field_name("superclass")?;
    let mut cursor = superclass.walk();
    let name = superclass
        .named_children(&mut cursor)
        .next()
        .map(|name| base.get_node_text(&name));
    name
}

struct TreeWalk<'a> {
    base: &'a BaseExtractor,
    declarations: &'a HashMap<usize, ScopeId>,
}

impl TreeWalk<'_> {
    fn walk(
        &self,
        node: Node,
        scope: ScopeId,
        engine: &mut RouteExtractionEngine<'_>,
    ) -> Result<(), ScanError> {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "class" | "module" => {
                    let inner = self.declarations.get(&child.id()).copied().unwrap_or(scope);
                    self.walk(child, inner, engine)?;
                }
                "call" => {
                    let keyword = helpers::call_method_name(self.base, &child)
                        .and_then(|name| Keyword::from_call_name(&name));
                    if let Some(keyword) = keyword {
                        let candidate = TreeCandidate {
                            walker: self,
                            node: child,
                            keyword,
                        };
                        // Candidate blocks belong to the engine: namespace
                        // bodies are re-entered through each_nested, route
                        // bodies are not scanned.
                        engine.process(&candidate, scope)?;
                    } else {
                        self.walk(child, scope, engine)?;
                    }
                }
                _ => self.walk(child, scope, engine)?,
            }
        }
        Ok(())
    }
}

struct TreeCandidate<'w, 'a, 't> {
    walker: &'w TreeWalk<'a>,
    node: Node<'t>,
    keyword: Keyword,
}

impl Candidate for TreeCandidate<'_, '_, '_> {
    fn keyword(&self) -> Keyword {
        self.keyword
    }

    fn raw_path(&self) -> String {
        helpers::first_path_argument(self.walker.base, &self.node)
    }

    fn receiver(&self) -> Receiver {
        helpers::call_receiver(self.walker.base, &self.node)
    }

    fn inside_instance_method(&self) -> bool {
        helpers::inside_instance_method(&self.node)
    }

    fn docstring(&self) -> Option<String> {
        self.walker.base.find_doc_comment(&self.node)
    }

    fn line(&self) -> u32 {
        self.walker.base.node_line(&self.node)
    }

    fn each_nested(
        &self,
        engine: &mut RouteExtractionEngine<'_>,
        scope: ScopeId,
    ) -> Result<(), ScanError> {
        if let Some(block) = helpers::call_block(&self.node) {
            self.walker.walk(block, scope, engine)?;
        }
        Ok(())
    }
}
