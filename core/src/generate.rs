//! Code generation for parsed definitions.
//!
//! For a batch
//!
//! ```text
//! NotFound : E : "no such file {path}",
//! Slow     : W : "took {ms}ms",
//! ```
//!
//! the generator emits, with the default configuration:
//!
//! ```ignore
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! pub enum ErrorCode { NotFound, Slow }
//!
//! #[doc = "E: `no such file {path}`"]
//! #[must_use]
//! pub fn not_found(path: &str) -> ::errkit::ErrorValue<ErrorCode> {
//!     ::errkit::ErrorValue {
//!         id: ErrorCode::NotFound,
//!         severity: "E",
//!         message: ::std::format!("no such file {path}", path = path),
//!     }
//! }
//!
//! #[doc = "W: `took {ms}ms`"]
//! #[must_use]
//! pub fn slow(ms: &str) -> ::errkit::ErrorValue<ErrorCode> { ... }
//! ```

use std::collections::HashMap;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::PathArguments;

use crate::case;
use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticKind};
use crate::parse::ErrorDefinition;
use crate::token::TokenSequence;

/// Emit the enum and one constructor per definition, in definition order.
pub fn generate(
    definitions: &[ErrorDefinition],
    config: &Config,
) -> Result<TokenSequence, Diagnostic> {
    let variants = definitions
        .iter()
        .map(variant_ident)
        .collect::<Result<Vec<_>, _>>()?;
    check_collisions(definitions)?;

    let enum_decl = enum_declaration(&variants, config);
    let constructors = definitions
        .iter()
        .zip(&variants)
        .map(|(def, variant)| constructor(def, variant, config));

    let output = quote! {
        #enum_decl
        #(#constructors)*
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(
        enum_name = %config.enum_name,
        functions = definitions.len(),
        "generated error definitions"
    );

    Ok(TokenSequence::from(output))
}

/// Enum variant for the definition id; keywords become raw identifiers.
fn variant_ident(def: &ErrorDefinition) -> Result<proc_macro2::Ident, Diagnostic> {
    case::host_ident(def.id.unraw(), def.id.span).ok_or_else(|| {
        Diagnostic::malformed(
            def.id.span,
            format!("`{}` cannot name an enum variant", def.id.text),
        )
    })
}

/// Rustdoc line for a constructor, with the template as inline code.
fn doc_line(severity: &str, template: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in template.chars() {
        run = if c == '`' { run + 1 } else { 0 };
        longest = longest.max(run);
    }
    let fence = "`".repeat(longest + 1);
    let pad = if template.starts_with('`') || template.ends_with('`') {
        " "
    } else {
        ""
    };
    format!("{severity}: {fence}{pad}{template}{pad}{fence}")
}

/// Fail on the first definition whose function name was already produced.
fn check_collisions(definitions: &[ErrorDefinition]) -> Result<(), Diagnostic> {
    let mut names: HashMap<String, &str> = HashMap::with_capacity(definitions.len());
    for def in definitions {
        let name = case::to_fn_name(def.id.unraw());
        if let Some(first) = names.get(name.as_str()) {
            return Err(Diagnostic::new(
                DiagnosticKind::NameCollision,
                def.id.span,
                format!(
                    "`{}` generates the function name `{}`, already generated for `{}`",
                    def.id.text, name, first
                ),
            ));
        }
        names.insert(name, &def.id.text);
    }
    Ok(())
}

fn enum_declaration(variants: &[proc_macro2::Ident], config: &Config) -> TokenStream {
    let Config {
        enum_name,
        visibility,
        derives,
        ..
    } = config;

    let derive_attr = if derives.is_empty() {
        quote! {}
    } else {
        quote! { #[derive(#(#derives),*)] }
    };

    quote! {
        #derive_attr
        #visibility enum #enum_name {
            #(#variants),*
        }
    }
}

fn constructor(
    def: &ErrorDefinition,
    variant: &proc_macro2::Ident,
    config: &Config,
) -> TokenStream {
    let Config {
        enum_name,
        visibility,
        ..
    } = config;

    let value_type = config.value_type();
    let mut value_ctor = value_type.clone();
    if let Some(last) = value_ctor.segments.last_mut() {
        last.arguments = PathArguments::None;
    }

    let fn_name = case::fn_ident(def.id.unraw(), def.id.span);
    let severity = def.severity.unraw();
    let doc = doc_line(severity, &def.template);

    let mut template = proc_macro2::Literal::string(&def.template);
    template.set_span(def.template_span);

    let params: Vec<_> = def
        .placeholders
        .iter()
        .map(|name| proc_macro2::Ident::new(name, Span::call_site()))
        .collect();

    quote! {
        #[doc = #doc]
        #[must_use]
        #visibility fn #fn_name(#(#params: &str),*) -> #value_type {
            #value_ctor {
                id: #enum_name::#variant,
                severity: #severity,
                message: ::std::format!(#template #(, #params = #params)*),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use crate::parse::parse_with;
    use quote::{ToTokens, format_ident};

    fn seq(src: &str) -> TokenSequence {
        TokenSequence::from(src.parse::<TokenStream>().unwrap())
    }

    fn generate_str(src: &str, config: &Config) -> Result<syn::File, Diagnostic> {
        let defs = parse_with(&seq(src), config)?;
        let out = generate(&defs, config)?;
        Ok(syn::parse2(out.into_token_stream()).unwrap())
    }

    fn item_enum(file: &syn::File) -> &syn::ItemEnum {
        file.items
            .iter()
            .find_map(|item| match item {
                syn::Item::Enum(e) => Some(e),
                _ => None,
            })
            .unwrap()
    }

    fn item_fns(file: &syn::File) -> Vec<&syn::ItemFn> {
        file.items
            .iter()
            .filter_map(|item| match item {
                syn::Item::Fn(f) => Some(f),
                _ => None,
            })
            .collect()
    }

    fn param_names(f: &syn::ItemFn) -> Vec<String> {
        f.sig
            .inputs
            .iter()
            .map(|arg| match arg {
                syn::FnArg::Typed(pat) => pat.pat.to_token_stream().to_string(),
                syn::FnArg::Receiver(_) => panic!("unexpected receiver"),
            })
            .collect()
    }

    #[test]
    fn test_scenario_single_placeholder() {
        let file = generate_str(r#"Foo : E : "bad {x}""#, &Config::default()).unwrap();
        let e = item_enum(&file);
        assert_eq!(e.ident, "ErrorCode");
        assert_eq!(e.variants.len(), 1);
        assert_eq!(e.variants[0].ident, "Foo");

        let fns = item_fns(&file);
        assert_eq!(fns.len(), 1);
        assert_eq!(fns[0].sig.ident, "foo");
        assert_eq!(param_names(fns[0]), ["x"]);
    }

    #[test]
    fn test_scenario_repeated_placeholder() {
        let file = generate_str(
            r#"Foo : E : "msg", Bar : W : "msg {y} {y}","#,
            &Config::default(),
        )
        .unwrap();
        let e = item_enum(&file);
        let variants: Vec<_> = e.variants.iter().map(|v| v.ident.to_string()).collect();
        assert_eq!(variants, ["Foo", "Bar"]);

        let fns = item_fns(&file);
        assert_eq!(fns.len(), 2);
        assert!(param_names(fns[0]).is_empty());
        assert_eq!(param_names(fns[1]), ["y"]);
    }

    #[test]
    fn test_counts_match_definitions() {
        let src = r#"
            NotFound : E : "no such file {path}",
            Denied : E : "{user} cannot {action} {path}",
            Slow : W : "took {ms}ms ({ms})",
            Done : I : "done",
        "#;
        let file = generate_str(src, &Config::default()).unwrap();
        assert_eq!(item_enum(&file).variants.len(), 4);

        let fns = item_fns(&file);
        let arity: Vec<_> = fns.iter().map(|f| f.sig.inputs.len()).collect();
        assert_eq!(arity, [1, 3, 1, 0]);
        assert_eq!(param_names(fns[1]), ["user", "action", "path"]);
    }

    #[test]
    fn test_empty_batch() {
        let file = generate_str("", &Config::default()).unwrap();
        assert!(item_enum(&file).variants.is_empty());
        assert!(item_fns(&file).is_empty());
    }

    #[test]
    fn test_enum_precedes_functions() {
        let file = generate_str(r#"A : E : "a", B : E : "b""#, &Config::default()).unwrap();
        assert!(matches!(file.items[0], syn::Item::Enum(_)));
        assert_eq!(file.items.len(), 3);
    }

    #[test]
    fn test_name_collision() {
        let err = generate_str(r#"FooBar : E : "a", Foo_Bar : E : "b""#, &Config::default())
            .unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::NameCollision);
        assert!(err.message().contains("`foo_bar`"));
    }

    #[test]
    fn test_deferred_duplicate_is_a_collision() {
        let config = Config::new().with_duplicates(DuplicatePolicy::Defer);
        let err = generate_str(r#"Foo : E : "a", Foo : W : "b""#, &config).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::NameCollision);
    }

    #[test]
    fn test_configuration_is_applied() {
        let config = Config::new()
            .with_enum_name(format_ident!("Code"))
            .with_visibility(syn::Visibility::Inherited)
            .with_value_type(syn::parse_quote!(crate::Report))
            .with_derives(Vec::new());
        let file = generate_str(r#"NotFound : E : "gone""#, &config).unwrap();

        let e = item_enum(&file);
        assert_eq!(e.ident, "Code");
        assert!(matches!(e.vis, syn::Visibility::Inherited));
        assert!(e.attrs.is_empty());

        let f = item_fns(&file)[0];
        assert!(matches!(f.vis, syn::Visibility::Inherited));
        match &f.sig.output {
            syn::ReturnType::Type(_, ty) => {
                assert_eq!(ty.to_token_stream().to_string(), "crate :: Report")
            }
            syn::ReturnType::Default => panic!("missing return type"),
        }
    }

    #[test]
    fn test_generic_value_type_constructed_without_arguments() {
        let file = generate_str(r#"Foo : E : "x""#, &Config::default()).unwrap();
        let f = item_fns(&file)[0];
        let syn::Stmt::Expr(syn::Expr::Struct(body), None) = &f.block.stmts[0] else {
            panic!("expected struct expression");
        };
        assert_eq!(
            body.path.to_token_stream().to_string(),
            ":: errkit :: ErrorValue"
        );
        let fields: Vec<_> = body
            .fields
            .iter()
            .map(|fv| fv.member.to_token_stream().to_string())
            .collect();
        assert_eq!(fields, ["id", "severity", "message"]);
    }

    #[test]
    fn test_keyword_id_gets_raw_function() {
        let file = generate_str(r#"Type : E : "x""#, &Config::default()).unwrap();
        let f = item_fns(&file)[0];
        assert_eq!(f.sig.ident.to_string(), "r#type");
    }

    #[test]
    fn test_keyword_ids_become_raw_variants() {
        let file = generate_str(r#"match : E : "x", gen : W : "y""#, &Config::default()).unwrap();
        let variants: Vec<_> = item_enum(&file)
            .variants
            .iter()
            .map(|v| v.ident.to_string())
            .collect();
        assert_eq!(variants, ["r#match", "r#gen"]);

        let names: Vec<_> = item_fns(&file)
            .iter()
            .map(|f| f.sig.ident.to_string())
            .collect();
        assert_eq!(names, ["r#match", "r#gen"]);
    }

    #[test_case::test_case(r#"_ : E : "x""#; "underscore")]
    #[test_case::test_case(r#"Ok : E : "a", self : E : "x""#; "self")]
    #[test_case::test_case(r#"Self : E : "x""#; "self type")]
    #[test_case::test_case(r#"crate : E : "x""#; "crate")]
    #[test_case::test_case(r#"super : E : "x""#; "super")]
    fn test_unrawable_id_rejected(src: &str) {
        let err = generate_str(src, &Config::default()).unwrap_err();
        assert_eq!(err.kind(), DiagnosticKind::MalformedDefinition);
        assert!(err.message().contains("cannot name an enum variant"));
    }

    #[test_case::test_case("bad {x}", "E: `bad {x}`"; "plain")]
    #[test_case::test_case("see [docs] for {x}", "E: `see [docs] for {x}`"; "brackets")]
    #[test_case::test_case("use `cargo {cmd}`", "E: `` use `cargo {cmd}` ``"; "inner backticks")]
    fn test_doc_line(template: &str, expected: &str) {
        assert_eq!(doc_line("E", template), expected);
    }

    #[test]
    fn test_doc_attribute_quotes_template() {
        let file = generate_str(r#"Foo : E : "see [x] {y}""#, &Config::default()).unwrap();
        let doc = &item_fns(&file)[0].attrs[0];
        let syn::Meta::NameValue(nv) = &doc.meta else {
            panic!("expected doc attribute");
        };
        assert_eq!(
            nv.value.to_token_stream().to_string(),
            r#""E: `see [x] {y}`""#
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let src = r#"A : E : "{a} {b}", B : W : "{c}", CThing : E : "x""#;
        let config = Config::default();
        let defs = parse_with(&seq(src), &config).unwrap();
        let first = generate(&defs, &config).unwrap().to_string();
        for _ in 0..4 {
            assert_eq!(generate(&defs, &config).unwrap().to_string(), first);
        }
    }
}
