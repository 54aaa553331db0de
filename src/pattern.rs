//! Path template parsing.
//!
//! Parses a Sinatra-style route template into its literal fragments and the
//! ordered list of named parameters. The dialect: `:name` introduces a named
//! parameter, `*` is a splat (matched but unnamed), and parentheses delimit
//! optional groups.

use crate::error::PatternParseError;

/// Parse result of a path template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathPattern {
    literal_segments: Vec<String>,
    named_parameters: Vec<String>,
}

impl PathPattern {
    /// Parse a template. Pure function: no shared state, same input gives
    /// the same output.
    ///
    /// A parameter name that recurs is recorded once, at its first
    /// position. Unbalanced group delimiters and empty parameter names fail
    /// with a [`PatternParseError`]; callers are expected to recover per
    /// route rather than propagate.
    pub fn parse(template: &str) -> Result<Self, PatternParseError> {
        let mut literal_segments = Vec::new();
        let mut named_parameters: Vec<String> = Vec::new();
        let mut literal = String::new();
        let mut depth = 0usize;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                ':' => {
                    let mut name = String::new();
                    while let Some(&next) = chars.peek() {
                        if next.is_ascii_alphanumeric() || next == '_' {
                            name.push(next);
                            chars.next();
                        } else {
                            break;
                        }
                    }
                    if name.is_empty() {
                        return Err(error(template, "empty parameter name"));
                    }
                    if name.starts_with(|c: char| c.is_ascii_digit()) {
                        return Err(error(template, &format!("invalid parameter name ':{name}'")));
                    }
                    flush(&mut literal, &mut literal_segments);
                    if !named_parameters.contains(&name) {
                        named_parameters.push(name);
                    }
                }
                // splat: matched but never named
                '*' => flush(&mut literal, &mut literal_segments),
                '(' => {
                    depth += 1;
                    flush(&mut literal, &mut literal_segments);
                }
                ')' => {
                    if depth == 0 {
                        return Err(error(template, "unbalanced ')'"));
                    }
                    depth -= 1;
                    flush(&mut literal, &mut literal_segments);
                }
                other => literal.push(other),
            }
        }
        if depth > 0 {
            return Err(error(template, "unclosed '('"));
        }
        flush(&mut literal, &mut literal_segments);

        Ok(Self {
            literal_segments,
            named_parameters,
        })
    }

    pub fn literal_segments(&self) -> &[String] {
        &self.literal_segments
    }

    pub fn named_parameters(&self) -> &[String] {
        &self.named_parameters
    }

    pub fn into_parameters(self) -> Vec<String> {
        self.named_parameters
    }
}

fn flush(literal: &mut String, segments: &mut Vec<String>) {
    if !literal.is_empty() {
        segments.push(std::mem::take(literal));
    }
}

fn error(template: &str, reason: &str) -> PatternParseError {
    PatternParseError {
        template: template.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_named_parameters_left_to_right() {
        let pattern = PathPattern::parse("/users/:id/posts/:postId").unwrap();
        assert_eq!(pattern.named_parameters(), ["id", "postId"]);
        assert_eq!(pattern.literal_segments(), ["/users/", "/posts/"]);
    }

    #[test]
    fn repeated_parameter_is_recorded_once_at_first_position() {
        let pattern = PathPattern::parse("/:name/compare/:other/:name").unwrap();
        assert_eq!(pattern.named_parameters(), ["name", "other"]);
    }

    #[test]
    fn splat_is_matched_but_unnamed() {
        let pattern = PathPattern::parse("/files/*").unwrap();
        assert!(pattern.named_parameters().is_empty());
        assert_eq!(pattern.literal_segments(), ["/files/"]);
    }

    #[test]
    fn optional_group_contributes_its_parameters() {
        let pattern = PathPattern::parse("/posts/:id(.:format)").unwrap();
        assert_eq!(pattern.named_parameters(), ["id", "format"]);
    }

    #[test]
    fn plain_literal_path_has_no_parameters() {
        let pattern = PathPattern::parse("/settings").unwrap();
        assert!(pattern.named_parameters().is_empty());
        assert_eq!(pattern.literal_segments(), ["/settings"]);
    }

    #[test]
    fn empty_parameter_name_is_rejected() {
        let err = PathPattern::parse("/users/:").unwrap_err();
        assert_eq!(err.template, "/users/:");
        assert!(err.reason.contains("empty parameter name"));
    }

    #[test]
    fn unbalanced_groups_are_rejected() {
        assert!(PathPattern::parse("/a(/b").is_err());
        assert!(PathPattern::parse("/a)/b").is_err());
    }

    #[test]
    fn parsing_is_idempotent() {
        let first = PathPattern::parse("/users/:id/posts/:postId").unwrap();
        let second = PathPattern::parse("/users/:id/posts/:postId").unwrap();
        assert_eq!(first, second);
    }
}
