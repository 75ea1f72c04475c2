//! Fuzz target for module directive parsing and policy resolution.
//!
//! Goal: directive handling should **never panic** and must always yield a retry budget of at
//! least one.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_directives
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use pwgate_settings::{PwgateConfigV1, parse_directives, resolve_policy};

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        let args: Vec<&str> = text.split_whitespace().collect();
        let directives = parse_directives(&args);
        assert_eq!(directives.len(), args.len());

        let policy = resolve_policy(&PwgateConfigV1::default(), &directives);
        assert!(policy.retry >= 1);
    }
});
