//! Fuzz target for reporter argument strings and properties files.
//!
//! Tests that malformed entries are dropped rather than panicking, and
//! that every parsed key is non-empty.

#![no_main]

use cs_config::parse::{parse_args, parse_properties};
use cs_config::ConfigResolver;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for (key, _) in parse_args(text) {
        assert!(!key.is_empty());
    }
    let _ = parse_properties(text);

    let resolver = ConfigResolver::builder().args(text).build();
    let _ = resolver.get_bool("show.env", false);
    let _ = resolver.to_map();
});
