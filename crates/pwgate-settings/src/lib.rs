//! Config parsing, module directive grammar, and policy resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod directive;
mod model;
mod resolve;

pub use directive::{COMPAT_IGNORED_PREFIXES, DEFAULT_RETRY, Directive, parse_directive};
pub use model::{EngineValue, PwgateConfigV1};
pub use resolve::ResolvedPolicy;

/// Parse `pwgate.toml` (or equivalent) into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<PwgateConfigV1> {
    let cfg: PwgateConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Parse every directive token, in order.
pub fn parse_directives<S: AsRef<str>>(tokens: &[S]) -> Vec<Directive> {
    tokens.iter().map(|t| parse_directive(t.as_ref())).collect()
}

/// Resolve the effective policy (config file values, then directives in order).
pub fn resolve_policy(cfg: &PwgateConfigV1, directives: &[Directive]) -> ResolvedPolicy {
    resolve::resolve_policy(cfg, directives)
}
