//! Ruby language configuration shared by the tree-mode scanner.

use anyhow::Result;
use tree_sitter::Parser;

/// Tree-sitter language for Ruby source.
pub fn ruby_language() -> tree_sitter::Language {
    tree_sitter_ruby::LANGUAGE.into()
}

/// Build a parser configured for Ruby.
pub fn ruby_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&ruby_language())
        .map_err(|e| anyhow::anyhow!("Failed to set Ruby parser language: {}", e))?;
    Ok(parser)
}

/// Detect language from file extension. Only Ruby source is scannable.
pub fn detect_language_from_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "rb" | "ru" | "rake" | "gemspec" => Some("ruby"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognizes_ruby_extensions() {
        assert_eq!(detect_language_from_extension("rb"), Some("ruby"));
        assert_eq!(detect_language_from_extension("ru"), Some("ruby"));
        assert_eq!(detect_language_from_extension("py"), None);
    }
}
