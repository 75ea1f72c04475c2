//! Property-based tests for the ceremony driver and classifier.
//!
//! These tests use proptest to verify invariants around:
//! - classifier totality
//! - the retry bound
//! - user abort short-circuiting the loop
//! - the pending secret never surviving a failed ceremony
//! - failures after several tries reported as `PAM_MAXTRIES`

use crate::ceremony::run_ceremony;
use crate::classify::{GENERIC_FAILURE, classify};
use crate::test_support::{Reply, ScriptedEngine, ScriptedHost, context};
use pwgate_types::{PamCode, PamFlags, RejectReason, Verdict, all_reasons};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

fn arb_reason() -> impl Strategy<Value = RejectReason> {
    prop_oneof![
        prop::sample::select(all_reasons().to_vec()),
        (i32::MIN..0).prop_map(RejectReason::from_code),
    ]
}

fn arb_verdict() -> impl Strategy<Value = Verdict> {
    prop_oneof![
        (0i32..100).prop_map(|score| Verdict::Accepted { score }),
        (arb_reason(), proptest::option::of("[a-z ]{0,20}"))
            .prop_map(|(reason, diagnostic)| Verdict::Rejected { reason, diagnostic }),
    ]
}

fn arb_reply() -> impl Strategy<Value = Reply> {
    prop_oneof![
        6 => "[a-z]{1,8}".prop_map(Reply::Value),
        1 => Just(Reply::Abort),
        1 => Just(Reply::Fail(PamCode::CONV_ERR)),
    ]
}

#[derive(Debug)]
struct Scenario {
    retry: u32,
    verdicts: Vec<Verdict>,
    candidates: Vec<Reply>,
    confirmations: Vec<Reply>,
    privileged: bool,
    expired: bool,
}

fn arb_scenario() -> impl Strategy<Value = Scenario> {
    (
        1u32..6,
        prop::collection::vec(arb_verdict(), 0..8),
        prop::collection::vec(arb_reply(), 0..8),
        prop::collection::vec(arb_reply(), 0..8),
        any::<bool>(),
        any::<bool>(),
    )
        .prop_map(
            |(retry, verdicts, candidates, confirmations, privileged, expired)| Scenario {
                retry,
                verdicts,
                candidates,
                confirmations,
                privileged,
                expired,
            },
        )
}

fn build(scenario: &Scenario) -> (ScriptedEngine, ScriptedHost) {
    let mut engine = ScriptedEngine::new();
    for v in &scenario.verdicts {
        engine = engine.verdict(v.clone());
    }
    let mut host = ScriptedHost::new().with_pending("stale");
    for r in &scenario.candidates {
        host = host.candidate(r.clone());
    }
    for r in &scenario.confirmations {
        host = host.confirmation(r.clone());
    }
    (engine, host)
}

fn flags(expired: bool) -> PamFlags {
    if expired {
        PamFlags::UPDATE_AUTHTOK | PamFlags::CHANGE_EXPIRED_AUTHTOK
    } else {
        PamFlags::UPDATE_AUTHTOK
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn classifier_is_total(reason in arb_reason(), diagnostic in proptest::option::of(".{0,40}")) {
        let msg = classify(reason, diagnostic.as_deref());
        match (reason, diagnostic.as_deref()) {
            (RejectReason::DictionaryCheck, Some(text)) => prop_assert_eq!(msg, text),
            (RejectReason::Other(_), _) => prop_assert_eq!(msg, GENERIC_FAILURE),
            _ => prop_assert!(!msg.is_empty()),
        }
    }

    #[test]
    fn evaluations_never_exceed_budget(scenario in arb_scenario()) {
        let (engine, mut host) = build(&scenario);
        let ctx = context(engine, scenario.retry);
        let privileged = scenario.privileged;

        let report = run_ceremony(&ctx, &mut host, &move || privileged, flags(scenario.expired));

        prop_assert!(ctx.engine().evaluations() <= scenario.retry);
        prop_assert!(report.attempts <= scenario.retry);
        prop_assert_eq!(report.evaluations, ctx.engine().evaluations());
    }

    #[test]
    fn failed_ceremony_leaves_no_pending_secret(scenario in arb_scenario()) {
        let (engine, mut host) = build(&scenario);
        let ctx = context(engine, scenario.retry);
        let privileged = scenario.privileged;

        let report = run_ceremony(&ctx, &mut host, &move || privileged, flags(scenario.expired));

        if report.code.is_success() {
            prop_assert!(host.pending.is_some());
        } else {
            prop_assert_eq!(host.pending, None);
        }
    }

    #[test]
    fn multi_try_failures_are_generalized(scenario in arb_scenario()) {
        let (engine, mut host) = build(&scenario);
        let ctx = context(engine, scenario.retry);
        let privileged = scenario.privileged;

        let report = run_ceremony(&ctx, &mut host, &move || privileged, flags(scenario.expired));

        if report.code.is_success() {
            return Ok(());
        }
        if host.aborted {
            prop_assert_eq!(report.code, PamCode::AUTHTOK_ERR);
        } else {
            prop_assert_eq!(report.attempts, scenario.retry);
            if scenario.retry > 1 {
                prop_assert_eq!(report.code, PamCode::MAXTRIES);
            }
        }
    }

    #[test]
    fn first_abort_skips_the_engine(retry in 1u32..10) {
        let ctx = context(ScriptedEngine::new(), retry);
        let mut host = ScriptedHost::new().candidate(Reply::Abort);

        let report = run_ceremony(&ctx, &mut host, &|| true, PamFlags::UPDATE_AUTHTOK);

        prop_assert_eq!(report.code, PamCode::AUTHTOK_ERR);
        prop_assert_eq!(ctx.engine().evaluations(), 0);
        prop_assert_eq!(host.conversation_calls(), 1);
    }

    #[test]
    fn unprivileged_rejections_always_retry(retry in 1u32..6, reason in arb_reason()) {
        let mut engine = ScriptedEngine::new();
        let mut host = ScriptedHost::new();
        for _ in 0..retry {
            engine = engine.verdict(Verdict::rejected(reason));
            host = host.typed("candidate");
        }
        let ctx = context(engine, retry);

        let report = run_ceremony(&ctx, &mut host, &|| false, PamFlags::UPDATE_AUTHTOK);

        let expected = if retry > 1 { PamCode::MAXTRIES } else { PamCode::AUTHTOK_ERR };
        prop_assert_eq!(report.code, expected);
        prop_assert_eq!(host.confirmation_calls, 0);
        prop_assert_eq!(ctx.engine().evaluations(), retry);
    }
}
