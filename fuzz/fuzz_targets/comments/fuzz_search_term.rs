// Run with: cargo fuzz run fuzz_search_term
// The ILIKE pattern must never contain an unescaped wildcard from user input.
#![no_main]

use libfuzzer_sys::fuzz_target;
use techhub_comments::domain::SearchTerm;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(term) = SearchTerm::parse(Some(s.to_string())) else {
        return;
    };

    let pattern = term.like_pattern();
    let inner = &pattern[1..pattern.len() - 1];

    let mut escaped = false;
    for c in inner.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '%' | '_' => panic!("unescaped wildcard in {pattern:?}"),
            _ => {}
        }
    }
    assert!(!escaped, "dangling escape in {pattern:?}");
    assert!(term.matches(s));
});
