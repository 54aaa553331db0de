//! Ruby node helpers for route candidate discovery.

use tree_sitter::Node;

use super::Receiver;
use crate::extractors::base::BaseExtractor;

/// Method name of a call node, if any.
pub(super) fn call_method_name(base: &BaseExtractor, node: &Node) -> Option<String> {
    node.child_by_field_name("method")
        .map(|method| base.get_node_text(&method))
}

/// Explicit receiver form of a call.
pub(super) fn call_receiver(base: &BaseExtractor, node: &Node) -> Receiver {
    match node.child_by_field_name("receiver") {
        None => Receiver::Implicit,
        Some(receiver) if receiver.kind() == "self" => Receiver::SelfReceiver,
        Some(receiver) => Receiver::Named(base.get_node_text(&receiver)),
    }
}

/// Raw path literal from the call's first argument: surrounding quotes
/// stripped, empty when the call has no arguments.
pub(super) fn first_path_argument(base: &BaseExtractor, node: &Node) -> String {
    let Some(args) = node.child_by_field_name("arguments") else {
        return String::new();
    };
    let mut cursor = args.walk();
    let Some(first) = args.named_children(&mut cursor).next() else {
        return String::new();
    };
    strip_quotes(&base.get_node_text(&first))
}

pub(super) fn strip_quotes(raw: &str) -> String {
    let trimmed = raw.trim();
    let quoted = trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')));
    if quoted {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// True when the node sits inside an instance method body. Singleton
/// methods (`def self.x`) count as class scope.
pub(super) fn inside_instance_method(node: &Node) -> bool {
    let mut current = *node;
    while let Some(parent) = current.parent() {
        match parent.kind() {
            "method" => return true,
            "singleton_method" | "class" | "module" | "program" => return false,
            _ => {}
        }
        current = parent;
    }
    false
}

/// Body block attached to a call (`do ... end` or `{ ... }`).
pub(super) fn call_block<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if let Some(block) = node.child_by_field_name("block") {
        return Some(block);
    }
    let mut cursor = node.walk();
    let found = node
        .named_children(&mut cursor)
        .find(|child| matches!(child.kind(), "do_block" | "block"));
    found
}
