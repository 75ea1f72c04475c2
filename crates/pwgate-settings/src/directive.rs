//! Module directive grammar.
//!
//! Recognized tokens are matched by prefix, the same way sibling modules read their argument
//! vectors. Anything unrecognized belongs to the quality engine.

use serde::Serialize;

pub const DEFAULT_RETRY: u32 = 1;

/// Tokens accepted for option-surface compatibility with sibling modules and otherwise ignored.
pub const COMPAT_IGNORED_PREFIXES: &[&str] = &[
    "reject_username",
    "authtok_type",
    "use_authtok",
    "use_first_pass",
    "try_first_pass",
];

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Directive {
    Debug,
    /// `type=<value>`: credential-type hint for the host.
    AuthtokType(String),
    /// `retry=<n>`, already resolved to a positive budget.
    Retry(u32),
    /// Compatibility token, kept verbatim for diagnostics.
    Ignored(String),
    /// Forwarded verbatim to the quality engine.
    Engine(String),
}

pub fn parse_directive(token: &str) -> Directive {
    if token == "debug" {
        return Directive::Debug;
    }
    if let Some(value) = token.strip_prefix("type=") {
        return Directive::AuthtokType(value.to_string());
    }
    if let Some(value) = token.strip_prefix("retry=") {
        return Directive::Retry(parse_retry(value));
    }
    if COMPAT_IGNORED_PREFIXES.iter().any(|p| token.starts_with(p)) {
        return Directive::Ignored(token.to_string());
    }
    Directive::Engine(token.to_string())
}

/// Read the leading integer of `value` (`strtol` style). No digits, zero, negative, or
/// overflowing values all mean "use the default".
fn parse_retry(value: &str) -> u32 {
    let s = value.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if negative || digits.is_empty() {
        return DEFAULT_RETRY;
    }
    match digits.parse::<u32>() {
        Ok(n) if n >= 1 => n,
        _ => DEFAULT_RETRY,
    }
}
