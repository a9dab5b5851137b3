#![cfg_attr(
    not(test),
    deny(
        unsafe_code,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::todo,
        clippy::unimplemented,
        clippy::dbg_macro
    )
)]

//! Expansion engine behind `errkit::error_definitions!`.
//!
//! The pipeline, leaf to root:
//!
//! ```text
//! proc_macro2::TokenStream
//!     └── token::TokenSequence        owned token tree
//!         └── config::split_header    optional #[errkit(...)] options
//!             └── parse::parse_with   Vec<ErrorDefinition>
//!                 │   └── placeholder::extract_placeholders
//!                 └── generate::generate
//!                     └── TokenSequence -> proc_macro2::TokenStream
//! ```
//!
//! Any stage may fail with a [`Diagnostic`]; the first one ends the expansion
//! and is rendered as a `compile_error!` by [`Diagnostic::into_compile_error`].

pub mod case;
pub mod config;
mod diagnostic;
mod expand;
pub mod generate;
pub mod parse;
pub mod placeholder;
pub mod token;

pub use config::{Config, DEFAULT_ENUM_NAME, DuplicatePolicy, split_header};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use expand::{expand, expand_or_error};
pub use generate::generate;
pub use parse::{ErrorDefinition, parse, parse_with};
pub use placeholder::{PlaceholderError, extract_placeholders};
pub use token::{Token, TokenSequence};
