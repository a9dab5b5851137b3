#![deny(
    unsafe_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

//! Declare error ids with message templates, get an enum and typed
//! constructors at compile time.
//!
//! ```ignore
//! errkit::error_definitions! {
//!     NotFound : E : "no such file {path}",
//! }
//!
//! let err = not_found("/etc/hosts");
//! assert_eq!(err.to_string(), "[E] no such file /etc/hosts");
//! ```
pub use errkit_macros::*;

mod value;

pub use value::ErrorValue;
