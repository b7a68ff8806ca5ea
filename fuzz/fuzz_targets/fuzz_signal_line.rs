//! Fuzz target for JSONL signal decoding.
//!
//! Event streams are replayed from files, so malformed lines must decode to
//! an error, never a panic.

#![no_main]

use cs_core::Signal;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(line) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(signal) = Signal::from_json_line(line) {
        let _ = signal.kind();
    }
});
