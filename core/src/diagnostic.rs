//! Diagnostics and their conversion into compile errors.
//!
//! Every stage of the expansion returns `Result<_, Diagnostic>`. The first
//! diagnostic ends the expansion; nothing generated so far is emitted.

use crate::token::{Span, TokenSequence};

/// Category of an expansion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum DiagnosticKind {
    /// A definition does not match `IDENT : IDENT : STRING`.
    #[error("malformed definition")]
    MalformedDefinition,

    /// A `{` without a closing `}`, or a stray `}`.
    #[error("unbalanced placeholder")]
    UnbalancedPlaceholder,

    /// A placeholder whose name is empty or not a usable identifier.
    #[error("invalid placeholder")]
    InvalidPlaceholder,

    /// Two definitions map to the same constructor function name.
    #[error("name collision")]
    NameCollision,

    /// The same id is declared twice while duplicates are rejected.
    #[error("duplicate id")]
    DuplicateId,

    /// The `#[errkit(...)]` header could not be understood.
    #[error("invalid configuration")]
    InvalidConfig,
}

/// A reported failure with the location it refers to.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct Diagnostic {
    kind: DiagnosticKind,
    message: String,
    span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn malformed(span: Span, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::MalformedDefinition, span, message)
    }

    #[inline]
    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[inline]
    pub fn span(&self) -> Span {
        self.span
    }

    /// Render as a `compile_error!` invocation located at the diagnostic span.
    pub fn into_compile_error(self) -> proc_macro2::TokenStream {
        syn::Error::new(self.span, self.message).into_compile_error()
    }

    /// Token form of [`Diagnostic::into_compile_error`].
    pub fn report(&self) -> TokenSequence {
        TokenSequence::from(self.clone().into_compile_error())
    }
}

impl From<syn::Error> for Diagnostic {
    fn from(err: syn::Error) -> Self {
        Self::new(DiagnosticKind::InvalidConfig, err.span(), err.to_string())
    }
}
