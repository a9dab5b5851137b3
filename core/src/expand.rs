//! The full expansion pipeline: header, parse, generate.

use proc_macro2::TokenStream;

use crate::config::split_header;
use crate::diagnostic::Diagnostic;
use crate::generate::generate;
use crate::parse::parse_with;
use crate::token::TokenSequence;

/// Expand one `error_definitions!` invocation.
///
/// Stops at the first [`Diagnostic`]; on failure nothing generated so far is
/// returned.
pub fn expand(input: TokenStream) -> Result<TokenStream, Diagnostic> {
    let tokens = TokenSequence::from(input);
    let (config, body) = split_header(&tokens)?;
    let definitions = parse_with(&body, &config)?;
    let output = generate(&definitions, &config)?;
    Ok(output.into_token_stream())
}

/// Like [`expand`], rendering a failure as a `compile_error!` invocation.
pub fn expand_or_error(input: TokenStream) -> TokenStream {
    expand(input).unwrap_or_else(|d| {
        #[cfg(feature = "tracing")]
        tracing::debug!(kind = ?d.kind(), message = d.message(), "expansion failed");
        d.into_compile_error()
    })
}
