#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

/// One definition assembled from fuzzed parts, so most inputs get past the
/// lexer and exercise the parser and generator.
#[derive(Debug, Arbitrary)]
struct Definition {
    id: String,
    severity: String,
    template: String,
    separator: bool,
}

fuzz_target!(|defs: Vec<Definition>| {
    let mut src = String::new();
    for def in &defs {
        src.push_str(&format!("{} : {} : {:?}", def.id, def.severity, def.template));
        if def.separator {
            src.push(',');
        }
    }
    if let Ok(stream) = src.parse::<proc_macro2::TokenStream>() {
        let _ = errkit_core::expand_or_error(stream);
    }
});
