//! Expansion options and the `#[errkit(...)]` header that sets them.
//!
//! An invocation may start with a single outer attribute:
//!
//! ```ignore
//! error_definitions! {
//!     #[errkit(
//!         name = ParseCode,
//!         vis = pub(crate),
//!         value = crate::diag::Report,
//!         derive(Debug, Clone, Copy),
//!         duplicates = defer,
//!     )]
//!     NotFound : E : "no such file {path}",
//! }
//! ```
//!
//! # Default Values
//!
//! | Setting      | Default                                    |
//! |--------------|--------------------------------------------|
//! | `name`       | `ErrorCode`                                |
//! | `vis`        | `pub`                                      |
//! | `value`      | `::errkit::ErrorValue<{name}>`             |
//! | `derive`     | `Debug, Clone, Copy, PartialEq, Eq, Hash`  |
//! | `duplicates` | `reject`                                   |

use proc_macro2::Span;
use quote::format_ident;
use syn::{Ident, Path, Visibility};

use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::token::{Delimiter, Token, TokenSequence};

/// Name of the generated enum when none is configured.
pub const DEFAULT_ENUM_NAME: &str = "ErrorCode";

/// Handling of an id that appears more than once in a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DuplicatePolicy {
    /// Fail with [`DiagnosticKind::DuplicateId`] at the second occurrence.
    #[default]
    Reject,
    /// Skip the check; the duplicate then surfaces as a
    /// [`DiagnosticKind::NameCollision`] from the generator.
    Defer,
}

/// Options for one expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub enum_name: Ident,
    pub visibility: Visibility,
    /// Struct returned by each generated function; `None` selects
    /// `::errkit::ErrorValue<{enum_name}>`.
    pub value_type: Option<Path>,
    pub derives: Vec<Path>,
    pub duplicates: DuplicatePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    pub fn new() -> Self {
        Self {
            enum_name: Ident::new(DEFAULT_ENUM_NAME, Span::call_site()),
            visibility: Visibility::Public(Default::default()),
            value_type: None,
            derives: ["Debug", "Clone", "Copy", "PartialEq", "Eq", "Hash"]
                .into_iter()
                .map(|d| Path::from(format_ident!("{}", d)))
                .collect(),
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_enum_name(mut self, name: Ident) -> Self {
        self.enum_name = name;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_value_type(mut self, path: Path) -> Self {
        self.value_type = Some(path);
        self
    }

    /// The configured value type, or the default instantiated with the enum.
    pub fn value_type(&self) -> Path {
        match &self.value_type {
            Some(path) => path.clone(),
            None => {
                let name = &self.enum_name;
                syn::parse_quote!(::errkit::ErrorValue<#name>)
            }
        }
    }

    pub fn with_derives(mut self, derives: Vec<Path>) -> Self {
        self.derives = derives;
        self
    }

    pub fn with_duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Apply the options of an `#[errkit(...)]` attribute on top of `self`.
    pub fn apply(&mut self, attr: &syn::Attribute) -> syn::Result<()> {
        if !attr.path().is_ident("errkit") {
            return Err(syn::Error::new_spanned(
                attr.path(),
                "expected `#[errkit(...)]` header",
            ));
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("name") {
                self.enum_name = meta.value()?.parse()?;
            } else if meta.path.is_ident("vis") {
                let value = meta.value()?;
                if value.peek(syn::Token![pub]) {
                    self.visibility = value.parse()?;
                } else {
                    let ident: Ident = value.parse()?;
                    if ident != "private" {
                        return Err(syn::Error::new(
                            ident.span(),
                            "expected `pub`, `pub(...)` or `private`",
                        ));
                    }
                    self.visibility = Visibility::Inherited;
                }
            } else if meta.path.is_ident("value") {
                self.value_type = Some(meta.value()?.parse()?);
            } else if meta.path.is_ident("derive") {
                let mut derives = Vec::new();
                meta.parse_nested_meta(|inner| {
                    derives.push(inner.path);
                    Ok(())
                })?;
                self.derives = derives;
            } else if meta.path.is_ident("duplicates") {
                let ident: Ident = meta.value()?.parse()?;
                self.duplicates = match ident.to_string().as_str() {
                    "reject" => DuplicatePolicy::Reject,
                    "defer" => DuplicatePolicy::Defer,
                    _ => {
                        return Err(syn::Error::new(
                            ident.span(),
                            "expected `reject` or `defer`",
                        ));
                    }
                };
            } else {
                let name = meta
                    .path
                    .get_ident()
                    .map(ToString::to_string)
                    .unwrap_or_default();
                return Err(meta.error(format!("unknown option `{}`", name)));
            }
            Ok(())
        })
    }
}

fn header_at(tokens: &TokenSequence, index: usize) -> bool {
    tokens.get(index).is_some_and(|t| t.is_punct('#'))
        && tokens
            .get(index + 1)
            .and_then(Token::as_group)
            .is_some_and(|g| g.delimiter == Delimiter::Bracket)
}

/// Split an optional leading `#[errkit(...)]` header from the definitions.
///
/// Returns the resulting configuration and the remaining tokens.
pub fn split_header(tokens: &TokenSequence) -> Result<(Config, TokenSequence), Diagnostic> {
    let mut config = Config::new();
    if !header_at(tokens, 0) {
        return Ok((config, tokens.clone()));
    }

    let header: TokenSequence = tokens.as_slice()[..2].iter().cloned().collect();
    let attrs = syn::parse::Parser::parse2(syn::Attribute::parse_outer, header.into_token_stream())?;
    for attr in &attrs {
        config.apply(attr)?;
    }

    if header_at(tokens, 2) {
        let span = tokens.get(2).map(Token::span).unwrap_or_else(Span::call_site);
        return Err(Diagnostic::new(
            DiagnosticKind::InvalidConfig,
            span,
            "only one `#[errkit(...)]` header is allowed",
        ));
    }

    Ok((config, tokens.tail(2)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    fn seq(src: &str) -> TokenSequence {
        TokenSequence::from(src.parse::<proc_macro2::TokenStream>().unwrap())
    }

    fn render<T: ToTokens>(t: &T) -> String {
        t.to_token_stream().to_string()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.enum_name, DEFAULT_ENUM_NAME);
        assert!(matches!(config.visibility, Visibility::Public(_)));
        assert!(config.value_type.is_none());
        assert_eq!(render(&config.value_type()), ":: errkit :: ErrorValue < ErrorCode >");
        assert_eq!(config.derives.len(), 6);
        assert_eq!(config.duplicates, DuplicatePolicy::Reject);
    }

    #[test]
    fn test_builder() {
        let config = Config::new()
            .with_enum_name(format_ident!("Code"))
            .with_visibility(Visibility::Inherited)
            .with_derives(Vec::new())
            .with_duplicates(DuplicatePolicy::Defer);

        assert_eq!(config.enum_name, "Code");
        assert_eq!(render(&config.value_type()), ":: errkit :: ErrorValue < Code >");
        assert!(matches!(config.visibility, Visibility::Inherited));
        assert!(config.derives.is_empty());
        assert_eq!(config.duplicates, DuplicatePolicy::Defer);
    }

    #[test]
    fn test_no_header() {
        let tokens = seq(r#"Foo : E : "x""#);
        let (config, rest) = split_header(&tokens).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(rest.len(), tokens.len());
    }

    #[test]
    fn test_full_header() {
        let tokens = seq(
            r#"#[errkit(name = Code, vis = pub(crate), value = crate::Report, derive(Debug), duplicates = defer)]
            Foo : E : "x""#,
        );
        let (config, rest) = split_header(&tokens).unwrap();
        assert_eq!(config.enum_name, "Code");
        assert_eq!(render(&config.visibility), "pub (crate)");
        assert_eq!(render(&config.value_type()), "crate :: Report");
        assert_eq!(config.derives.len(), 1);
        assert_eq!(config.duplicates, DuplicatePolicy::Defer);
        assert_eq!(rest.len(), 5);
    }

    #[test]
    fn test_private_visibility() {
        let (config, _) = split_header(&seq("#[errkit(vis = private)]")).unwrap();
        assert!(matches!(config.visibility, Visibility::Inherited));
    }

    #[test_case::test_case("#[errkit(bogus = 1)]", "unknown option `bogus`"; "unknown key")]
    #[test_case::test_case("#[errkit(vis = hidden)]", "expected `pub`"; "bad visibility")]
    #[test_case::test_case("#[errkit(duplicates = maybe)]", "expected `reject` or `defer`"; "bad policy")]
    #[test_case::test_case("#[other(name = X)]", "expected `#[errkit(...)]` header"; "wrong path")]
    #[test_case::test_case("#[errkit(name = A)] #[errkit(name = B)]", "only one"; "two headers")]
    fn test_invalid_header(src: &str, needle: &str) {
        let err = split_header(&seq(src)).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::InvalidConfig);
        assert!(
            err.message().contains(needle),
            "{:?} does not contain {:?}",
            err.message(),
            needle
        );
    }
}
