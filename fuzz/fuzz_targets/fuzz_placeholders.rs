#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|template: &str| {
    if let Ok(names) = errkit_core::extract_placeholders(template) {
        for (i, name) in names.iter().enumerate() {
            assert!(!name.is_empty());
            assert!(!names[..i].contains(name));
        }
        assert_eq!(errkit_core::extract_placeholders(template).ok(), Some(names));
    }
});
