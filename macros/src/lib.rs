#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Procedural macro for the errkit error declaration toolkit.
//!
//! This crate provides [`error_definitions!`], which turns a list of
//! `id : severity : "template"` declarations into an enum of ids plus one
//! constructor function per declaration.
//!
//! # Quick Start
//!
//! ```ignore
//! use errkit::error_definitions;
//!
//! error_definitions! {
//!     NotFound : E : "no such file {path}",
//!     Slow : W : "took {ms}ms",
//! }
//!
//! let err = not_found("/etc/hosts");
//! assert_eq!(err.id, ErrorCode::NotFound);
//! ```
use proc_macro::TokenStream;

/// Generates an error code enum and constructor functions.
///
/// # Syntax
///
/// ```ignore
/// error_definitions! {
///     // Optional: expansion options
///     #[errkit(
///         name = ErrorCode,              // enum name
///         vis = pub,                     // `pub`, `pub(...)` or `private`
///         value = ::errkit::ErrorValue<ErrorCode>, // returned struct
///         derive(Debug, Clone, Copy),    // enum derives
///         duplicates = reject,           // `reject` or `defer`
///     )]
///
///     // One definition per entry, trailing comma optional
///     <Id> : <Severity> : "<template with {placeholders}>",
/// }
/// ```
///
/// # Generated Code
///
/// The macro generates:
/// - An enum with one variant per definition, named exactly like the id
/// - One function per definition, named by snake-casing the id, taking one
///   `&str` parameter per distinct placeholder in first-occurrence order
///
/// Each function returns the value type built from the id, the severity as a
/// `&'static str`, and the template formatted with the arguments.
///
/// # Errors
///
/// Expansion stops at the first problem and emits a single `compile_error!`:
/// - malformed definitions (`Foo : E "msg"`, `Foo :: E : "msg"`)
/// - unbalanced or invalid placeholders (`"{x"`, `"{}"`, `"{0}"`)
/// - two ids mapping to one function name (`FooBar`, `Foo_Bar`)
/// - duplicate ids, unless `duplicates = defer`
/// - unknown or malformed `#[errkit(...)]` options
///
/// # Example
///
/// ```ignore
/// error_definitions! {
///     #[errkit(name = IoCode)]
///     OpenFailed : E : "cannot open {path}: {reason}",
///     Retrying : W : "retrying {path}",
/// }
///
/// let err = open_failed("a.txt", "denied");
/// assert_eq!(err.id, IoCode::OpenFailed);
/// assert_eq!(err.severity, "E");
/// assert_eq!(err.message, "cannot open a.txt: denied");
/// ```
#[proc_macro]
pub fn error_definitions(input: TokenStream) -> TokenStream {
    errkit_core::expand_or_error(proc_macro2::TokenStream::from(input)).into()
}
