//! Legacy token front end.
//!
//! Line-oriented scan driven by a leading-token matcher, for inputs where
//! no syntax tree is available. Nesting is tracked by counting Ruby block
//! openers against `end`, which covers declaration-style source; receivers
//! and brace blocks spanning lines are beyond what a leading-token match
//! can see. For equivalent input this front end produces the same catalogs
//! as the tree front end.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::catalog::RouteCatalog;
use super::scopes::{ScopeGraph, ScopeId, ROOT_SCOPE};
use super::{Candidate, Receiver, RouteExtractionEngine};
use crate::config::ScanOptions;
use crate::error::ScanError;
use crate::extractors::base::{clean_comment_line, Keyword};

static CANDIDATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\A(get|post|put|patch|delete|head|not_found|namespace)[\s(]").unwrap()
});
static STRING_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["']([^"']*)["']"#).unwrap());
static CLASS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\Aclass\s+([A-Z]\w*(?:::[A-Z]\w*)*)(?:\s*<\s*(\S+))?").unwrap());
static MODULE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\Amodule\s+([A-Z]\w*(?:::[A-Z]\w*)*)").unwrap());
static DEF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\Adef\s+(self\.)?").unwrap());
// `=` after the name or parameter list, not inside it
static ENDLESS_DEF_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\Adef\s+[\w.]+(\(.*\))?\s*=\s").unwrap());
static BLOCK_OPENER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\A(if|unless|while|until|case|begin|for)\b").unwrap());
static DO_TAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdo(\s*\|[^|]*\|)?\s*\z").unwrap());

pub(crate) fn extract(
    file_path: &str,
    content: &str,
    options: &ScanOptions,
) -> Result<RouteCatalog, ScanError> {
    let scan = TokenScan::new(content);
    let mut engine = RouteExtractionEngine::new(options, &scan.scopes, file_path);
    scan.scan_range(0, scan.lines.len(), ROOT_SCOPE, &mut engine)?;
    Ok(engine.into_catalog())
}

/// Block-stack entries of the main scan pass.
enum Frame {
    Scope(ScopeId),
    InstanceMethod,
    Other,
}

struct TokenScan<'a> {
    lines: Vec<&'a str>,
    scopes: ScopeGraph,
    /// Line index of each class/module declaration.
    scope_at_line: HashMap<usize, ScopeId>,
}

impl<'a> TokenScan<'a> {
    /// Pre-pass: collect class/module declarations so gates can resolve
    /// names before extraction starts.
    fn new(content: &'a str) -> Self {
        let lines: Vec<&str> = content.lines().collect();
        let mut scopes = ScopeGraph::new();
        let mut scope_at_line = HashMap::new();
        // Some(_) marks a scope opener, None any other opener
        let mut stack: Vec<Option<ScopeId>> = Vec::new();
        let mut current = ROOT_SCOPE;

        for (idx, raw) in lines.iter().enumerate() {
            let code = code_portion(raw).trim();
            if code.is_empty() {
                continue;
            }
            if let Some(caps) = CLASS_RE.captures(code) {
                let superclass = caps.get(2).map(|m| m.as_str().to_string());
                let id = scopes.add(current, &caps[1], superclass);
                scope_at_line.insert(idx, id);
                stack.push(Some(current));
                current = id;
            } else if let Some(caps) = MODULE_RE.captures(code) {
                let id = scopes.add(current, &caps[1], None);
                scope_at_line.insert(idx, id);
                stack.push(Some(current));
                current = id;
            } else if is_end(code) {
                if let Some(entry) = stack.pop() {
                    if let Some(parent) = entry {
                        current = parent;
                    }
                }
            } else if opens_block(code) {
                stack.push(None);
            }
        }

        Self {
            lines,
            scopes,
            scope_at_line,
        }
    }

    fn scan_range(
        &self,
        start: usize,
        end: usize,
        outer_scope: ScopeId,
        engine: &mut RouteExtractionEngine<'_>,
    ) -> Result<(), ScanError> {
        let mut frames: Vec<Frame> = Vec::new();
        let mut pending_comments: Vec<String> = Vec::new();
        let mut i = start;

        while i < end {
            let raw = self.lines[i];
            let code = code_portion(raw).trim();

            if code.is_empty() {
                let trimmed = raw.trim();
                if trimmed.starts_with('#') {
                    pending_comments.push(clean_comment_line(trimmed));
                }
                // blank lines keep a pending comment block attached
                i += 1;
                continue;
            }

            if let Some(caps) = CANDIDATE_RE.captures(code) {
                if let Some(keyword) = Keyword::from_call_name(&caps[1]) {
                    let raw_path = STRING_RE
                        .captures(code)
                        .map(|c| c[1].to_string())
                        .unwrap_or_default();
                    let body = if DO_TAIL_RE.is_match(code) {
                        Some((i + 1, self.matching_end(i + 1, end)))
                    } else {
                        None
                    };
                    let candidate = TokenCandidate {
                        scan: self,
                        keyword,
                        raw_path,
                        docstring: join_comments(&pending_comments),
                        line: (i + 1) as u32,
                        body,
                        inside_instance_method: frames
                            .iter()
                            .any(|f| matches!(f, Frame::InstanceMethod)),
                    };
                    pending_comments.clear();
                    let scope = current_scope(&frames, outer_scope);
                    engine.process(&candidate, scope)?;
                    i = body.map(|(_, close)| close + 1).unwrap_or(i + 1);
                    continue;
                }
            }

            pending_comments.clear();
            if let Some(&scope) = self.scope_at_line.get(&i) {
                frames.push(Frame::Scope(scope));
            } else if is_end(code) {
                frames.pop();
            } else if opens_block(code) {
                if DEF_RE.is_match(code) && !code.starts_with("def self.") {
                    frames.push(Frame::InstanceMethod);
                } else {
                    frames.push(Frame::Other);
                }
            }
            i += 1;
        }
        Ok(())
    }

    /// Index of the `end` closing a block opened just before `from`.
    fn matching_end(&self, from: usize, limit: usize) -> usize {
        let mut depth = 1usize;
        for j in from..limit {
            let code = code_portion(self.lines[j]).trim();
            if code.is_empty() {
                continue;
            }
            if is_end(code) {
                depth -= 1;
                if depth == 0 {
                    return j;
                }
                continue;
            }
            if CLASS_RE.is_match(code) || MODULE_RE.is_match(code) || opens_block(code) {
                depth += 1;
            }
        }
        limit
    }
}

struct TokenCandidate<'s, 'a> {
    scan: &'s TokenScan<'a>,
    keyword: Keyword,
    raw_path: String,
    docstring: Option<String>,
    line: u32,
    body: Option<(usize, usize)>,
    inside_instance_method: bool,
}

impl Candidate for TokenCandidate<'_, '_> {
    fn keyword(&self) -> Keyword {
        self.keyword
    }

    fn raw_path(&self) -> String {
        self.raw_path.clone()
    }

    fn receiver(&self) -> Receiver {
        // a leading-token match has no receiver form
        Receiver::Implicit
    }

    fn inside_instance_method(&self) -> bool {
        self.inside_instance_method
    }

    fn docstring(&self) -> Option<String> {
        self.docstring.clone()
    }

    fn line(&self) -> u32 {
        self.line
    }

    fn each_nested(
        &self,
        engine: &mut RouteExtractionEngine<'_>,
        scope: ScopeId,
    ) -> Result<(), ScanError> {
        match self.body {
            Some((start, end)) => self.scan.scan_range(start, end, scope, engine),
            None => Ok(()),
        }
    }
}

fn current_scope(frames: &[Frame], outer_scope: ScopeId) -> ScopeId {
    frames
        .iter()
        .rev()
        .find_map(|f| match f {
            Frame::Scope(id) => Some(*id),
            _ => None,
        })
        .unwrap_or(outer_scope)
}

fn join_comments(comments: &[String]) -> Option<String> {
    if comments.is_empty() {
        None
    } else {
        Some(comments.join("\n"))
    }
}

fn is_end(code: &str) -> bool {
    code == "end" || code.starts_with("end ")
}

fn opens_block(code: &str) -> bool {
    if DEF_RE.is_match(code) {
        // endless defs and one-line bodies close themselves
        return !ENDLESS_DEF_RE.is_match(code) && !code.ends_with("end");
    }
    (BLOCK_OPENER_RE.is_match(code) || DO_TAIL_RE.is_match(code)) && !code.ends_with("end")
}

/// Cut a line at the first `#` outside of string literals.
fn code_portion(line: &str) -> &str {
    let mut in_single = false;
    let mut in_double = false;
    for (i, c) in line.char_indices() {
        match c {
            '\'' if !in_double => in_single = !in_single,
            '"' if !in_single => in_double = !in_double,
            '#' if !in_single && !in_double => return &line[..i],
            _ => {}
        }
    }
    line
}
