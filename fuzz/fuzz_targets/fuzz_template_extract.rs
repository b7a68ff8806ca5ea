//! Fuzz target for report template extraction.
//!
//! Skeletons may be user supplied through a template directory, so any
//! input must yield fragments or a `TemplateError`, never a panic.

#![no_main]

use cs_report::extract;
use cs_report::template::tokens;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(document) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(fragments) = extract(document) {
        assert!(fragments.outer.contains(tokens::INSERT_FEATURES));
        assert!(fragments.outer.contains(tokens::INSERT_SUBTOTAL));
        assert!(fragments.feature.contains(tokens::INSERT_TESTCASES));
    }
});
