//! The password-change entry point: set up the policy context, then run the ceremony.

use crate::config::{ConfigSource, load_config};
use pwgate_domain::host::{Conversation, EngineFactory, Privilege, QualityEngine, SessionItems};
use pwgate_domain::policy::PolicyContext;
use pwgate_domain::{CeremonyReport, run_ceremony};
use pwgate_settings::ResolvedPolicy;
use pwgate_types::{PamCode, PamFlags};

/// Input for one host invocation.
#[derive(Clone, Debug)]
pub struct ChauthtokInput<'a> {
    /// Phase and modifier flags from the host.
    pub flags: PamFlags,
    /// Module directives from the host's stack configuration.
    pub args: &'a [&'a str],
    pub config: ConfigSource,
}

/// Handle one host invocation of the password-change entry point.
///
/// The engine is allocated first; if that fails nothing else happens and the host gets
/// `PAM_BUF_ERR`. The engine lives inside the policy context and is released when this
/// function returns, whichever way the ceremony ended.
pub fn run_chauthtok<F, H, P>(
    input: ChauthtokInput<'_>,
    factory: &F,
    host: &mut H,
    privilege: &P,
) -> CeremonyReport
where
    F: EngineFactory,
    H: SessionItems + Conversation,
    P: Privilege + ?Sized,
{
    let Some(engine) = factory.allocate() else {
        tracing::error!("quality engine allocation failed");
        return CeremonyReport::immediate(PamCode::BUF_ERR);
    };

    let cfg = load_config(&input.config);
    let directives = pwgate_settings::parse_directives(input.args);
    let policy = pwgate_settings::resolve_policy(&cfg, &directives);

    let ctx = build_context(engine, &policy, host);
    if ctx.debug() {
        tracing::debug!(
            retry = ctx.retry_budget(),
            flags = %input.flags,
            ignored = ?policy.ignored,
            "policy resolved"
        );
    }

    run_ceremony(&ctx, host, privilege, input.flags)
}

fn build_context<E, H>(mut engine: E, policy: &ResolvedPolicy, host: &mut H) -> PolicyContext<E>
where
    E: QualityEngine,
    H: SessionItems,
{
    if let Some(authtok_type) = policy.authtok_type.as_deref()
        && let Err(err) = host.set_authtok_type(authtok_type)
    {
        tracing::warn!(error = %err, authtok_type, "setting credential type failed");
    }

    for option in &policy.engine_options {
        if let Err(err) = engine.set_option(option) {
            tracing::warn!(error = %err, option = option.as_str(), "unknown or broken option");
        }
    }

    PolicyContext::new(engine, policy.retry, policy.debug)
}
