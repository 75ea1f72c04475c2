//! The password-change ceremony: phase dispatch and the bounded retry loop.

use crate::classify::{MISTYPED_PASS, bad_password, classify};
use crate::host::{Conversation, Privilege, QualityEngine, SessionItems};
use crate::policy::PolicyContext;
use pwgate_types::{PamCode, PamFlags, Verdict};
use secrecy::{ExposeSecret, SecretString};
use subtle::ConstantTimeEq;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    PrelimCheck,
    UpdateAuthtok,
}

impl Phase {
    /// The preliminary check wins when a host sets both phase bits.
    pub fn from_flags(flags: PamFlags) -> Option<Phase> {
        if flags.contains(PamFlags::PRELIM_CHECK) {
            Some(Phase::PrelimCheck)
        } else if flags.contains(PamFlags::UPDATE_AUTHTOK) {
            Some(Phase::UpdateAuthtok)
        } else {
            None
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CeremonyState {
    Idle,
    AwaitingCandidate,
    Evaluating,
    AwaitingConfirmation,
    Succeeded,
    Failed,
}

/// Terminal result of one invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CeremonyReport {
    pub code: PamCode,
    pub state: CeremonyState,
    /// Loop iterations started (0 outside the update phase).
    pub attempts: u32,
    /// Engine evaluations performed.
    pub evaluations: u32,
    /// Last classified rejection shown to the user.
    pub last_rejection: Option<String>,
}

impl CeremonyReport {
    /// A terminal result reached before any attempt was started.
    pub fn immediate(code: PamCode) -> Self {
        Self {
            code,
            state: if code.is_success() {
                CeremonyState::Succeeded
            } else {
                CeremonyState::Failed
            },
            attempts: 0,
            evaluations: 0,
            last_rejection: None,
        }
    }
}

/// Run one invocation of the ceremony for the phase selected by `flags`.
///
/// The preliminary check cannot validate anything useful (the engine's dictionary location is
/// not discoverable from here), so it always succeeds and all work happens in the update phase.
pub fn run_ceremony<E, H, P>(
    ctx: &PolicyContext<E>,
    host: &mut H,
    privilege: &P,
    flags: PamFlags,
) -> CeremonyReport
where
    E: QualityEngine,
    H: SessionItems + Conversation,
    P: Privilege + ?Sized,
{
    match Phase::from_flags(flags) {
        Some(Phase::PrelimCheck) => CeremonyReport::immediate(PamCode::SUCCESS),
        Some(Phase::UpdateAuthtok) => Ceremony::new(ctx, host, privilege, flags).run(),
        None => {
            if ctx.debug() {
                tracing::info!(flags = %flags, "unknown flags setting");
            }
            CeremonyReport::immediate(PamCode::SERVICE_ERR)
        }
    }
}

enum Attempt {
    Succeeded,
    Retry(PamCode),
    Aborted,
}

struct Ceremony<'a, E, H, P: ?Sized> {
    ctx: &'a PolicyContext<E>,
    host: &'a mut H,
    privilege: &'a P,
    flags: PamFlags,
    state: CeremonyState,
    evaluations: u32,
    last_rejection: Option<String>,
}

impl<'a, E, H, P> Ceremony<'a, E, H, P>
where
    E: QualityEngine,
    H: SessionItems + Conversation,
    P: Privilege + ?Sized,
{
    fn new(ctx: &'a PolicyContext<E>, host: &'a mut H, privilege: &'a P, flags: PamFlags) -> Self {
        Self {
            ctx,
            host,
            privilege,
            flags,
            state: CeremonyState::Idle,
            evaluations: 0,
            last_rejection: None,
        }
    }

    fn run(mut self) -> CeremonyReport {
        let prior = match self.host.old_authtok() {
            Ok(prior) => prior,
            Err(err) => {
                if self.ctx.debug() {
                    tracing::error!(error = %err, "can not get old password");
                }
                None
            }
        };

        let budget = self.ctx.retry_budget();
        let mut last_error = PamCode::AUTHTOK_ERR;

        for attempt in 1..=budget {
            match self.attempt(attempt, prior.as_ref()) {
                Attempt::Succeeded => return self.finish(PamCode::SUCCESS, attempt),
                Attempt::Aborted => {
                    self.clear_pending();
                    return self.finish(PamCode::AUTHTOK_ERR, attempt);
                }
                Attempt::Retry(code) => last_error = code,
            }
        }

        self.clear_pending();
        // After several tries, do not reveal which rule failed last.
        let code = if budget > 1 {
            PamCode::MAXTRIES
        } else {
            last_error
        };
        self.finish(code, budget)
    }

    fn attempt(&mut self, attempt: u32, prior: Option<&SecretString>) -> Attempt {
        self.enter(CeremonyState::AwaitingCandidate);
        let candidate = match self.host.acquire_candidate() {
            Ok(Some(candidate)) => candidate,
            Ok(None) => {
                if self.ctx.debug() {
                    tracing::debug!(attempt, "user aborted password change");
                }
                return Attempt::Aborted;
            }
            Err(err) => {
                tracing::error!(attempt, error = %err, "new password acquisition failed");
                return Attempt::Retry(err.code);
            }
        };

        self.enter(CeremonyState::Evaluating);
        self.evaluations += 1;
        match self.ctx.engine().evaluate(&candidate, prior) {
            Verdict::Accepted { score } => {
                if self.ctx.debug() {
                    tracing::debug!(attempt, score, "password score");
                }
            }
            Verdict::Rejected { reason, diagnostic } => {
                let message = classify(reason, diagnostic.as_deref()).to_string();
                if self.ctx.debug() {
                    tracing::debug!(
                        attempt,
                        reason = reason.name(),
                        code = reason.code(),
                        "bad password: {message}"
                    );
                }
                self.host.display_error(&bad_password(&message));
                self.last_rejection = Some(message);

                if !self.bypass_allowed() {
                    self.clear_pending();
                    return Attempt::Retry(PamCode::AUTHTOK_ERR);
                }
                if self.ctx.debug() {
                    tracing::debug!(attempt, "rejection is advisory for privileged caller");
                }
            }
        }

        self.enter(CeremonyState::AwaitingConfirmation);
        let confirmation = match self.host.acquire_confirmation() {
            Ok(Some(confirmation)) => confirmation,
            Ok(None) => {
                if self.ctx.debug() {
                    tracing::debug!(attempt, "user aborted password confirmation");
                }
                return Attempt::Aborted;
            }
            Err(err) => {
                tracing::error!(attempt, error = %err, "password confirmation failed");
                self.clear_pending();
                return Attempt::Retry(err.code);
            }
        };

        if !same_secret(&candidate, &confirmation) {
            self.host.display_error(MISTYPED_PASS);
            self.clear_pending();
            return Attempt::Retry(PamCode::AUTHTOK_RECOVERY_ERR);
        }

        if let Err(err) = self.host.set_authtok(Some(&candidate)) {
            tracing::error!(attempt, error = %err, "storing new password failed");
            self.clear_pending();
            return Attempt::Retry(err.code);
        }

        Attempt::Succeeded
    }

    /// Privileged callers may override a rejection, unless the host is forcing an expired
    /// password change.
    fn bypass_allowed(&self) -> bool {
        self.privilege.is_privileged() && !self.flags.contains(PamFlags::CHANGE_EXPIRED_AUTHTOK)
    }

    fn clear_pending(&mut self) {
        if let Err(err) = self.host.set_authtok(None) {
            tracing::warn!(error = %err, "clearing pending password failed");
        }
    }

    fn enter(&mut self, next: CeremonyState) {
        if self.ctx.debug() {
            tracing::trace!(from = ?self.state, to = ?next, "ceremony transition");
        }
        self.state = next;
    }

    fn finish(mut self, code: PamCode, attempts: u32) -> CeremonyReport {
        self.enter(if code.is_success() {
            CeremonyState::Succeeded
        } else {
            CeremonyState::Failed
        });
        CeremonyReport {
            code,
            state: self.state,
            attempts,
            evaluations: self.evaluations,
            last_rejection: self.last_rejection,
        }
    }
}

fn same_secret(a: &SecretString, b: &SecretString) -> bool {
    let a = a.expose_secret().as_bytes();
    let b = b.expose_secret().as_bytes();
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
