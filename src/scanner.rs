//! RouteScanner - public API for route extraction
//!
//! Builds the Ruby parser, runs one extraction per call and hands back the
//! catalog. Each scan owns its own engine, prefix stack and catalog; no
//! state is shared across scans, so scanning files in parallel is safe as
//! long as every scan keeps its own catalog.

use std::path::Path;

use crate::config::ScanOptions;
use crate::extractors::base::BaseExtractor;
use crate::extractors::routes;
use crate::extractors::routes::catalog::RouteCatalog;
use crate::language;

pub struct RouteScanner {
    options: ScanOptions,
}

impl Default for RouteScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl RouteScanner {
    pub fn new() -> Self {
        Self {
            options: ScanOptions::default(),
        }
    }

    pub fn with_options(options: ScanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Extract routes from Ruby source using the tree-sitter front end.
    pub fn scan(&self, file_path: &str, content: &str) -> Result<RouteCatalog, anyhow::Error> {
        let mut parser = language::ruby_parser()?;
        let tree = parser
            .parse(content, None)
            .ok_or_else(|| anyhow::anyhow!("Failed to parse file: {}", file_path))?;

        let base = BaseExtractor::new(file_path.to_string(), content.to_string());
        let catalog = routes::tree::extract(&base, &tree, &self.options)?;

        tracing::debug!(
            "Extracted {} routes and {} error handlers from {}",
            catalog.routes().len(),
            catalog.error_handlers().len(),
            file_path
        );
        Ok(catalog)
    }

    /// Extract routes with the legacy token front end (no syntax tree).
    pub fn scan_legacy(
        &self,
        file_path: &str,
        content: &str,
    ) -> Result<RouteCatalog, anyhow::Error> {
        let catalog = routes::tokens::extract(file_path, content, &self.options)?;
        tracing::debug!(
            "Extracted {} routes and {} error handlers from {} (legacy mode)",
            catalog.routes().len(),
            catalog.error_handlers().len(),
            file_path
        );
        Ok(catalog)
    }

    /// Read a Ruby source file from disk and scan it without executing it.
    pub fn scan_path(&self, path: &Path) -> Result<RouteCatalog, anyhow::Error> {
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        if language::detect_language_from_extension(extension).is_none() {
            anyhow::bail!("Unsupported file extension: {}", extension);
        }
        let content = std::fs::read_to_string(path)?;
        self.scan(&path.to_string_lossy(), &content)
    }
}
