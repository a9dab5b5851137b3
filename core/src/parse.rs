//! Grammar parser for error definition batches.
//!
//! ```text
//! batch      := definition (COMMA definition)* COMMA? | ε
//! definition := IDENT COLON IDENT COLON STRING
//! ```
//!
//! Each definition is exactly five tokens plus an optional comma. The parser
//! branches only on token variants, never on identifier text: any severity
//! identifier is accepted. The first mismatch ends parsing with a
//! [`DiagnosticKind::MalformedDefinition`].

use std::collections::HashSet;

use crate::config::{Config, DuplicatePolicy};
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::placeholder::extract_placeholders;
use crate::token::{Ident, Literal, LiteralKind, Span, Token, TokenSequence};

/// One parsed `id : severity : "template"` declaration.
#[derive(Debug, Clone)]
pub struct ErrorDefinition {
    pub id: Ident,
    pub severity: Ident,
    /// Decoded template text.
    pub template: String,
    pub template_span: Span,
    /// Unique placeholder names in first-occurrence order.
    pub placeholders: Vec<String>,
}

/// Forward-only cursor over a token slice that remembers the last token it
/// handed out, for end-of-input diagnostics.
struct Cursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    last: Span,
}

impl<'a> Cursor<'a> {
    fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            last: Span::call_site(),
        }
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    #[inline]
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self, expect: &str) -> Result<&'a Token, Diagnostic> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                self.last = token.span();
                Ok(token)
            }
            None => Err(Diagnostic::malformed(
                self.last,
                format!("expected {expect}, found end of input"),
            )),
        }
    }

    fn unexpected(token: &Token, expect: &str) -> Diagnostic {
        Diagnostic::malformed(
            token.span(),
            format!("expected {expect}, found {}", token.describe()),
        )
    }

    fn ident(&mut self, expect: &str) -> Result<&'a Ident, Diagnostic> {
        let token = self.next(expect)?;
        token.as_ident().ok_or_else(|| Self::unexpected(token, expect))
    }

    fn colon(&mut self) -> Result<(), Diagnostic> {
        let token = self.next("`:`")?;
        match token.as_punct() {
            Some(p) if p.ch == ':' && !p.is_joint() => Ok(()),
            Some(p) if p.ch == ':' => {
                let found = match self.peek() {
                    Some(next) if next.is_punct(':') => "`::`".to_string(),
                    Some(Token::Punct(next)) => format!("`:{}`", next.ch),
                    _ => "a multi-character operator".to_string(),
                };
                Err(Diagnostic::malformed(
                    p.span,
                    format!("expected a single `:`, found {found}"),
                ))
            }
            _ => Err(Self::unexpected(token, "`:`")),
        }
    }

    fn string(&mut self) -> Result<&'a Literal, Diagnostic> {
        const EXPECT: &str = "a string literal message";
        let token = self.next(EXPECT)?;
        match token.as_literal() {
            Some(lit) if lit.kind == LiteralKind::Str && lit.suffix.is_none() => Ok(lit),
            _ => Err(Self::unexpected(token, EXPECT)),
        }
    }
}

/// Parse a batch with the default configuration.
pub fn parse(tokens: &TokenSequence) -> Result<Vec<ErrorDefinition>, Diagnostic> {
    parse_with(tokens, &Config::default())
}

/// Parse a batch, applying the duplicate-id policy of `config`.
pub fn parse_with(
    tokens: &TokenSequence,
    config: &Config,
) -> Result<Vec<ErrorDefinition>, Diagnostic> {
    let mut cursor = Cursor::new(tokens.as_slice());
    let mut definitions = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    while !cursor.is_empty() {
        let def = parse_definition(&mut cursor)?;

        if config.duplicates == DuplicatePolicy::Reject && !seen.insert(def.id.unraw().to_owned())
        {
            return Err(Diagnostic::new(
                DiagnosticKind::DuplicateId,
                def.id.span,
                format!("`{}` is defined more than once", def.id.text),
            ));
        }
        definitions.push(def);

        match cursor.peek() {
            None => break,
            Some(token) if token.is_punct(',') => {
                cursor.next("`,`")?;
            }
            Some(token) => return Err(Cursor::unexpected(token, "`,` or end of input")),
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(count = definitions.len(), "parsed error definitions");

    Ok(definitions)
}

fn parse_definition(cursor: &mut Cursor<'_>) -> Result<ErrorDefinition, Diagnostic> {
    let id = cursor.ident("an error id")?;
    cursor.colon()?;
    let severity = cursor.ident("a severity identifier")?;
    cursor.colon()?;
    let message = cursor.string()?;

    let template = message
        .str_value()
        .ok_or_else(|| Diagnostic::malformed(message.span(), "expected a string literal message"))?;
    let placeholders = extract_placeholders(&template).map_err(|err| {
        let span = message.content_span(err.range.clone());
        err.into_diagnostic(span)
    })?;

    Ok(ErrorDefinition {
        id: id.clone(),
        severity: severity.clone(),
        template,
        template_span: message.span(),
        placeholders,
    })
}
