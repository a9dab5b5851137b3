//! Conversion from definition ids to constructor function names.
//!
//! The rule is total and deterministic:
//!
//! 1. Split the id into words at `_`, at a lowercase or digit followed by an
//!    uppercase letter, and before the last capital of an uppercase run that
//!    is followed by a lowercase letter.
//! 2. Lowercase every word and join the words with `_`. Leading underscores
//!    are kept.
//! 3. A result that is a keyword becomes a raw identifier (`r#type`), except
//!    for `self`, `super`, `crate`, `Self` and a bare `_`, which cannot be raw
//!    and get a trailing `_` instead.
//!
//! | id              | function name     |
//! |-----------------|-------------------|
//! | `NotFound`      | `not_found`       |
//! | `HTTPError`     | `http_error`      |
//! | `Io2Failure`    | `io2_failure`     |
//! | `already_snake` | `already_snake`   |
//! | `Type`          | `r#type`          |
//!
//! Distinct ids can still map to the same name (`FooBar`, `Foo_Bar`); the
//! generator reports those as collisions.

/// Words of an identifier according to the splitting rule.
pub fn split_words(id: &str) -> Vec<String> {
    let chars: Vec<char> = id.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' {
            if !current.is_empty() {
                words.push(core::mem::take(&mut current));
            }
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_lower) {
                words.push(core::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Snake-case text of the function name, without raw-identifier handling.
pub fn to_snake_case(id: &str) -> String {
    let leading = id.len() - id.trim_start_matches('_').len();
    let mut out = "_".repeat(leading);
    let words: Vec<String> = split_words(id).iter().map(|w| w.to_lowercase()).collect();
    out.push_str(&words.join("_"));
    out
}

/// Whether `name` is reserved and cannot be written as a plain identifier.
///
/// `gen` is reserved from edition 2024 on but is not in `syn`'s keyword list.
pub fn is_keyword(name: &str) -> bool {
    name == "gen" || syn::parse_str::<syn::Ident>(name).is_err()
}

/// Reserved names that have no raw-identifier form.
pub fn is_unrawable(name: &str) -> bool {
    matches!(name, "self" | "super" | "crate" | "Self" | "_")
}

/// Host identifier for `name`, raw when it is a keyword.
///
/// Returns `None` for names in [`is_unrawable`].
pub fn host_ident(name: &str, span: proc_macro2::Span) -> Option<proc_macro2::Ident> {
    if is_unrawable(name) {
        None
    } else if is_keyword(name) {
        Some(proc_macro2::Ident::new_raw(name, span))
    } else {
        Some(proc_macro2::Ident::new(name, span))
    }
}

/// Function name for the definition id, as emitted.
pub fn to_fn_name(id: &str) -> String {
    let snake = to_snake_case(id);
    if is_unrawable(&snake) {
        format!("{snake}_")
    } else if is_keyword(&snake) {
        format!("r#{snake}")
    } else {
        snake
    }
}

/// Host identifier for the function name.
pub fn fn_ident(id: &str, span: proc_macro2::Span) -> proc_macro2::Ident {
    let name = to_fn_name(id);
    match name.strip_prefix("r#") {
        Some(raw) => proc_macro2::Ident::new_raw(raw, span),
        None => proc_macro2::Ident::new(&name, span),
    }
}
