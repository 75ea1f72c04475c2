//! Fuzz target for `pwgate.toml` parsing.
//!
//! Goal: the parser may reject input but should **never panic**.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(cfg) = pwgate_settings::parse_config_toml(text) {
            let _ = pwgate_settings::resolve_policy(&cfg, &[]);
        }
    }
});
