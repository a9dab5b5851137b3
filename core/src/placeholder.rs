//! Placeholder extraction from message templates.
//!
//! A template uses `format!` brace syntax restricted to named slots:
//!
//! ```text
//! "cannot open {path}: {reason}"   -> [path, reason]
//! "{x} and {x} again"              -> [x]
//! "literal {{braces}}"             -> []
//! ```
//!
//! `{{` and `}}` are escapes. A single `{` opens a slot that the next `}`
//! closes; slots do not nest.

use core::ops::Range;

use crate::case;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::token::Span;

/// Failure inside a template, located by byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceholderError {
    pub kind: DiagnosticKind,
    pub message: String,
    pub range: Range<usize>,
}

impl PlaceholderError {
    fn unbalanced(range: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::UnbalancedPlaceholder,
            message: message.into(),
            range,
        }
    }

    fn invalid(range: Range<usize>, message: impl Into<String>) -> Self {
        Self {
            kind: DiagnosticKind::InvalidPlaceholder,
            message: message.into(),
            range,
        }
    }

    pub fn into_diagnostic(self, span: Span) -> Diagnostic {
        Diagnostic::new(self.kind, span, self.message)
    }
}

/// Extract unique placeholder names in order of first occurrence.
pub fn extract_placeholders(template: &str) -> Result<Vec<String>, PlaceholderError> {
    let bytes = template.as_bytes();
    let mut names: Vec<String> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => i += 2,
            b'}' if bytes.get(i + 1) == Some(&b'}') => i += 2,
            b'{' => {
                let Some(rel) = template[i + 1..].find('}') else {
                    return Err(PlaceholderError::unbalanced(
                        i..template.len(),
                        "unclosed `{` in message template",
                    ));
                };
                let close = i + 1 + rel;
                let name = &template[i + 1..close];
                validate_name(name).map_err(|msg| PlaceholderError::invalid(i..close + 1, msg))?;
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_owned());
                }
                i = close + 1;
            }
            b'}' => {
                return Err(PlaceholderError::unbalanced(
                    i..i + 1,
                    "unmatched `}` in message template; use `}}` for a literal brace",
                ));
            }
            _ => i += 1,
        }
    }

    Ok(names)
}

fn validate_name(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Err("empty placeholder `{}`; placeholders must be named".to_string());
    };
    if !(first.is_alphabetic() || first == '_') {
        return Err(format!(
            "placeholder `{{{name}}}` must start with a letter or `_`"
        ));
    }
    if let Some(bad) = name.chars().find(|c| !(c.is_alphanumeric() || *c == '_')) {
        return Err(format!(
            "placeholder `{{{name}}}` contains `{bad}`, which is not allowed in a name"
        ));
    }
    if name == "_" {
        return Err("placeholder `{_}` cannot be used as a parameter name".to_string());
    }
    // Keywords cannot name a parameter or a format argument.
    if case::is_keyword(name) {
        return Err(format!(
            "placeholder `{{{name}}}` is a keyword and cannot be used as a parameter name"
        ));
    }
    Ok(())
}
