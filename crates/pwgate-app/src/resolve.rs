//! The `resolve` use case: show what a directive line and config would produce.

use crate::config::{ConfigSource, read_config};
use anyhow::Context;
use pwgate_settings::{Directive, ResolvedPolicy};
use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct ResolveOutput {
    pub directives: Vec<Directive>,
    pub policy: ResolvedPolicy,
}

/// Resolve config plus directives. Unlike a real invocation, config errors are reported.
pub fn run_resolve<S: AsRef<str>>(
    config: &ConfigSource,
    args: &[S],
) -> anyhow::Result<ResolveOutput> {
    let cfg = read_config(config).context("load config")?;
    let directives = pwgate_settings::parse_directives(args);
    let policy = pwgate_settings::resolve_policy(&cfg, &directives);
    Ok(ResolveOutput { directives, policy })
}
