//! Owned token-tree model.
//!
//! The host hands the macro a [`proc_macro2::TokenStream`]; everything past the
//! entry point works on [`TokenSequence`], an owned, immutable tree that can be
//! inspected by index and rendered back to the host without loss.
//!
//! # Shape
//!
//! ```text
//! TokenSequence
//!     └── Token
//!         ├── Group(Group)      delimiter + nested TokenSequence
//!         ├── Ident(Ident)      word, keywords included
//!         ├── Punct(Punct)      one char + Joint/Alone spacing
//!         └── Literal(Literal)  kind tag + raw text + optional suffix
//! ```
//!
//! Every token carries the [`Span`] the host assigned to it, so diagnostics can
//! point back at user source.

use core::fmt;

pub use proc_macro2::{Delimiter, Spacing, Span};
use quote::{ToTokens, TokenStreamExt};

/// A single node of the token tree.
#[derive(Debug, Clone)]
pub enum Token {
    Group(Group),
    Ident(Ident),
    Punct(Punct),
    Literal(Literal),
}

impl Token {
    #[inline]
    pub fn span(&self) -> Span {
        match self {
            Token::Group(g) => g.span,
            Token::Ident(i) => i.span,
            Token::Punct(p) => p.span,
            Token::Literal(l) => l.span(),
        }
    }

    /// Short human description used in diagnostics, e.g. "identifier `Foo`".
    pub fn describe(&self) -> String {
        match self {
            Token::Group(g) => match g.delimiter {
                Delimiter::Parenthesis => "`( ... )` group".to_string(),
                Delimiter::Brace => "`{ ... }` group".to_string(),
                Delimiter::Bracket => "`[ ... ]` group".to_string(),
                Delimiter::None => "invisible group".to_string(),
            },
            Token::Ident(i) => format!("identifier `{}`", i.text),
            Token::Punct(p) => format!("`{}`", p.ch),
            Token::Literal(l) => format!("{} literal `{}`", l.kind, l.text),
        }
    }

    pub fn as_ident(&self) -> Option<&Ident> {
        match self {
            Token::Ident(i) => Some(i),
            _ => None,
        }
    }

    pub fn as_punct(&self) -> Option<&Punct> {
        match self {
            Token::Punct(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Token::Literal(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            Token::Group(g) => Some(g),
            _ => None,
        }
    }

    /// Whether this is a punctuation token with the given character.
    #[inline]
    pub fn is_punct(&self, ch: char) -> bool {
        matches!(self, Token::Punct(p) if p.ch == ch)
    }
}

/// Delimited group owning its children.
#[derive(Debug, Clone)]
pub struct Group {
    pub delimiter: Delimiter,
    pub stream: TokenSequence,
    pub span: Span,
}

#[derive(Debug, Clone)]
pub struct Ident {
    pub text: String,
    pub span: Span,
}

impl Ident {
    /// Convert to a host identifier, preserving the `r#` prefix of raw
    /// identifiers.
    pub fn to_host(&self) -> proc_macro2::Ident {
        match self.text.strip_prefix("r#") {
            Some(raw) => proc_macro2::Ident::new_raw(raw, self.span),
            None => proc_macro2::Ident::new(&self.text, self.span),
        }
    }

    /// Text without a raw-identifier prefix.
    pub fn unraw(&self) -> &str {
        self.text.strip_prefix("r#").unwrap_or(&self.text)
    }
}

impl PartialEq<str> for Ident {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Ident {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

#[derive(Debug, Clone)]
pub struct Punct {
    pub ch: char,
    pub spacing: Spacing,
    pub span: Span,
}

impl Punct {
    #[inline]
    pub fn is_joint(&self) -> bool {
        self.spacing == Spacing::Joint
    }
}

/// Literal category, as the host lexer classified it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    /// `"..."` or `r#"..."#`
    Str,
    ByteStr,
    CStr,
    Byte,
    Char,
    Int,
    Float,
    Other,
}

impl fmt::Display for LiteralKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LiteralKind::Str => "string",
            LiteralKind::ByteStr => "byte string",
            LiteralKind::CStr => "C string",
            LiteralKind::Byte => "byte",
            LiteralKind::Char => "character",
            LiteralKind::Int => "integer",
            LiteralKind::Float => "float",
            LiteralKind::Other => "unknown",
        };
        f.write_str(s)
    }
}

/// Literal with its classification and raw source text.
///
/// The host literal is kept alongside so that rendering back is exact and
/// sub-spans can still be requested from it.
#[derive(Debug, Clone)]
pub struct Literal {
    pub kind: LiteralKind,
    /// Source text including quotes, prefixes and suffix.
    pub text: String,
    pub suffix: Option<String>,
    repr: proc_macro2::Literal,
}

impl Literal {
    pub fn new(repr: proc_macro2::Literal) -> Self {
        let lit = syn::Lit::new(repr.clone());
        let kind = match &lit {
            syn::Lit::Str(_) => LiteralKind::Str,
            syn::Lit::ByteStr(_) => LiteralKind::ByteStr,
            syn::Lit::CStr(_) => LiteralKind::CStr,
            syn::Lit::Byte(_) => LiteralKind::Byte,
            syn::Lit::Char(_) => LiteralKind::Char,
            syn::Lit::Int(_) => LiteralKind::Int,
            syn::Lit::Float(_) => LiteralKind::Float,
            _ => LiteralKind::Other,
        };
        let suffix = Some(lit.suffix()).filter(|s| !s.is_empty()).map(str::to_owned);
        Self {
            kind,
            text: repr.to_string(),
            suffix,
            repr,
        }
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.repr.span()
    }

    /// Decoded contents of a string literal, `None` for any other kind.
    pub fn str_value(&self) -> Option<String> {
        match syn::Lit::new(self.repr.clone()) {
            syn::Lit::Str(s) => Some(s.value()),
            _ => None,
        }
    }

    /// Byte offset of the string contents inside [`Literal::text`], when the
    /// contents appear there verbatim (no escapes, no suffix).
    pub fn verbatim_offset(&self) -> Option<usize> {
        if self.kind != LiteralKind::Str || self.suffix.is_some() {
            return None;
        }
        let value = self.str_value()?;
        let start = self.text.find('"')? + 1;
        let body = self.text.get(start..start + value.len())?;
        (body == value).then_some(start)
    }

    /// Span covering `range` of the string contents, falling back to the whole
    /// literal when the host cannot resolve sub-spans.
    pub fn content_span(&self, range: core::ops::Range<usize>) -> Span {
        self.verbatim_offset()
            .and_then(|off| self.repr.subspan(range.start + off..range.end + off))
            .unwrap_or_else(|| self.span())
    }
}

/// Ordered, immutable sequence of tokens.
#[derive(Debug, Clone, Default)]
pub struct TokenSequence {
    tokens: Vec<Token>,
}

impl TokenSequence {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    #[inline]
    pub fn as_slice(&self) -> &[Token] {
        &self.tokens
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Sub-sequence starting at `index`.
    pub fn tail(&self, index: usize) -> TokenSequence {
        self.tokens.get(index..).unwrap_or_default().iter().cloned().collect()
    }

    /// Convert back into a host token stream.
    pub fn into_token_stream(self) -> proc_macro2::TokenStream {
        let mut out = proc_macro2::TokenStream::new();
        self.to_tokens(&mut out);
        out
    }
}

impl FromIterator<Token> for TokenSequence {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Token>> for TokenSequence {
    fn from(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }
}

impl<'a> IntoIterator for &'a TokenSequence {
    type Item = &'a Token;
    type IntoIter = core::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl From<proc_macro2::TokenTree> for Token {
    fn from(tt: proc_macro2::TokenTree) -> Self {
        match tt {
            proc_macro2::TokenTree::Group(g) => Token::Group(Group {
                delimiter: g.delimiter(),
                stream: TokenSequence::from(g.stream()),
                span: g.span(),
            }),
            proc_macro2::TokenTree::Ident(i) => Token::Ident(Ident {
                text: i.to_string(),
                span: i.span(),
            }),
            proc_macro2::TokenTree::Punct(p) => Token::Punct(Punct {
                ch: p.as_char(),
                spacing: p.spacing(),
                span: p.span(),
            }),
            proc_macro2::TokenTree::Literal(l) => Token::Literal(Literal::new(l)),
        }
    }
}

impl From<proc_macro2::TokenStream> for TokenSequence {
    fn from(stream: proc_macro2::TokenStream) -> Self {
        stream.into_iter().map(Token::from).collect()
    }
}

impl ToTokens for Token {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        match self {
            Token::Group(g) => {
                let mut group = proc_macro2::Group::new(g.delimiter, g.stream.to_token_stream());
                group.set_span(g.span);
                tokens.append(group);
            }
            Token::Ident(i) => tokens.append(i.to_host()),
            Token::Punct(p) => {
                let mut punct = proc_macro2::Punct::new(p.ch, p.spacing);
                punct.set_span(p.span);
                tokens.append(punct);
            }
            Token::Literal(l) => tokens.append(l.repr.clone()),
        }
    }
}

impl ToTokens for TokenSequence {
    fn to_tokens(&self, tokens: &mut proc_macro2::TokenStream) {
        for token in &self.tokens {
            token.to_tokens(tokens);
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Group(g) => {
                let (open, close) = match g.delimiter {
                    Delimiter::Parenthesis => ("(", ")"),
                    Delimiter::Brace => ("{", "}"),
                    Delimiter::Bracket => ("[", "]"),
                    Delimiter::None => ("", ""),
                };
                f.write_str(open)?;
                fmt::Display::fmt(&g.stream, f)?;
                f.write_str(close)
            }
            Token::Ident(i) => f.write_str(&i.text),
            Token::Punct(p) => write!(f, "{}", p.ch),
            Token::Literal(l) => f.write_str(&l.text),
        }
    }
}

/// Renders tokens separated by single spaces; a joint punctuation token is
/// glued to whatever follows it.
impl fmt::Display for TokenSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut glue = true;
        for token in &self.tokens {
            if !glue {
                f.write_str(" ")?;
            }
            fmt::Display::fmt(token, f)?;
            glue = matches!(token, Token::Punct(p) if p.is_joint());
        }
        Ok(())
    }
}
