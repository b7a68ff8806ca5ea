//! Fuzz target for token substitution.
//!
//! Substituted values are never rescanned: a value that itself looks like
//! a token must survive verbatim.

#![no_main]

use arbitrary::Arbitrary;
use cs_report::instantiate;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    fragment: String,
    bindings: Vec<(String, String)>,
}

fuzz_target!(|input: Input| {
    let bindings: Vec<(&str, &str)> = input
        .bindings
        .iter()
        .filter(|(token, _)| !token.is_empty())
        .map(|(token, value)| (token.as_str(), value.as_str()))
        .collect();
    let _ = instantiate(&input.fragment, &bindings);

    if !input.fragment.contains("$a") {
        assert_eq!(instantiate(&input.fragment, &[("$a", "$a$a")]), input.fragment);
    }
});
