// BaseExtractor: node-level plumbing for tree-mode extraction.

use tree_sitter::Node;

/// Owns the source text of one file and answers node-level questions
/// (text, doc comments, locations). One instance per scanned file.
pub struct BaseExtractor {
    pub file_path: String,
    pub content: String,
}

impl BaseExtractor {
    pub fn new(file_path: String, content: String) -> Self {
        Self { file_path, content }
    }

    /// Get text from a tree-sitter node.
    pub fn get_node_text(&self, node: &Node) -> String {
        let start_byte = node.start_byte();
        let end_byte = node.end_byte();

        // Byte slice, handling UTF-8 boundaries defensively
        let content_bytes = self.content.as_bytes();
        if start_byte < content_bytes.len() && end_byte <= content_bytes.len() {
            String::from_utf8_lossy(&content_bytes[start_byte..end_byte]).to_string()
        } else {
            String::new()
        }
    }

    /// Comment block immediately preceding a node, top to bottom, with the
    /// leading `#` markers stripped.
    pub fn find_doc_comment(&self, node: &Node) -> Option<String> {
        let mut comments = Vec::new();

        let mut current = preceding_named_node(node);
        while let Some(sibling) = current {
            if sibling.kind() == "comment" {
                comments.push(clean_comment_line(&self.get_node_text(&sibling)));
                current = preceding_named_node(&sibling);
            } else {
                // Stop at the first non-comment node
                break;
            }
        }

        if comments.is_empty() {
            None
        } else {
            // Reverse to get original order (top to bottom)
            comments.reverse();
            Some(comments.join("\n"))
        }
    }

    /// 1-based line of a node.
    pub fn node_line(&self, node: &Node) -> u32 {
        (node.start_position().row + 1) as u32
    }
}

/// Previous named node in source order. A node in first position has no
/// previous sibling, but a comment above the opening statement of a block
/// sits one level up (attached beside the block body, not inside it), so
/// the search ascends through first-position ancestors.
fn preceding_named_node<'t>(node: &Node<'t>) -> Option<Node<'t>> {
    if let Some(prev) = node.prev_named_sibling() {
        return Some(prev);
    }
    let mut current = *node;
    while let Some(parent) = current.parent() {
        if parent.named_child(0).map(|first| first.id()) != Some(current.id()) {
            return None;
        }
        if let Some(prev) = parent.prev_named_sibling() {
            return Some(prev);
        }
        current = parent;
    }
    None
}

/// Strip the `#` marker and at most one following space from a comment line.
pub fn clean_comment_line(line: &str) -> String {
    let trimmed = line.trim_start();
    let body = trimmed.strip_prefix('#').unwrap_or(trimmed);
    body.strip_prefix(' ').unwrap_or(body).to_string()
}
