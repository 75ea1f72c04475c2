//! Scripted doubles for the host and engine seams.

use crate::host::{
    Conversation, EngineFactory, EngineOptionError, HostError, QualityEngine, SessionItems,
};
use crate::policy::PolicyContext;
use pwgate_types::{PamCode, Verdict};
use secrecy::{ExposeSecret, SecretString};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

/// One scripted conversation answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    Value(String),
    Abort,
    Fail(PamCode),
}

impl Reply {
    pub fn value(s: &str) -> Self {
        Reply::Value(s.to_string())
    }
}

/// In-memory host: item store plus a scripted conversation.
///
/// An exhausted script answers with `PAM_CONV_ERR`.
#[derive(Debug)]
pub struct ScriptedHost {
    pub old: Result<Option<String>, HostError>,
    candidates: VecDeque<Reply>,
    confirmations: VecDeque<Reply>,
    pub pending: Option<String>,
    pub authtok_type: Option<String>,
    pub errors: Vec<String>,
    pub candidate_calls: u32,
    pub confirmation_calls: u32,
    /// Set once the user aborted at either prompt.
    pub aborted: bool,
    store_failure: Option<PamCode>,
    type_failure: Option<PamCode>,
}

impl Default for ScriptedHost {
    fn default() -> Self {
        Self {
            old: Ok(None),
            candidates: VecDeque::new(),
            confirmations: VecDeque::new(),
            pending: None,
            authtok_type: None,
            errors: Vec::new(),
            candidate_calls: 0,
            confirmation_calls: 0,
            aborted: false,
            store_failure: None,
            type_failure: None,
        }
    }
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_old(mut self, old: &str) -> Self {
        self.old = Ok(Some(old.to_string()));
        self
    }

    pub fn with_pending(mut self, pending: &str) -> Self {
        self.pending = Some(pending.to_string());
        self
    }

    pub fn candidate(mut self, reply: Reply) -> Self {
        self.candidates.push_back(reply);
        self
    }

    pub fn confirmation(mut self, reply: Reply) -> Self {
        self.confirmations.push_back(reply);
        self
    }

    /// Fail every attempt to store a new password; clearing still works.
    pub fn failing_store(mut self, code: PamCode) -> Self {
        self.store_failure = Some(code);
        self
    }

    pub fn failing_type(mut self, code: PamCode) -> Self {
        self.type_failure = Some(code);
        self
    }

    /// Script the same password for both prompts.
    pub fn typed(self, password: &str) -> Self {
        self.candidate(Reply::value(password))
            .confirmation(Reply::value(password))
    }

    pub fn conversation_calls(&self) -> u32 {
        self.candidate_calls + self.confirmation_calls
    }

    fn answer(&mut self, reply: Option<Reply>) -> Result<Option<SecretString>, HostError> {
        match reply {
            Some(Reply::Value(s)) => Ok(Some(SecretString::from(s))),
            Some(Reply::Abort) => {
                self.aborted = true;
                Ok(None)
            }
            Some(Reply::Fail(code)) => Err(HostError::new(code, "scripted conversation failure")),
            None => Err(HostError::new(PamCode::CONV_ERR, "conversation script exhausted")),
        }
    }
}

impl SessionItems for ScriptedHost {
    fn old_authtok(&self) -> Result<Option<SecretString>, HostError> {
        self.old
            .clone()
            .map(|old| old.map(SecretString::from))
    }

    fn set_authtok(&mut self, value: Option<&SecretString>) -> Result<(), HostError> {
        if let (Some(_), Some(code)) = (value, self.store_failure) {
            return Err(HostError::new(code, "scripted store failure"));
        }
        self.pending = value.map(|v| v.expose_secret().to_string());
        Ok(())
    }

    fn set_authtok_type(&mut self, value: &str) -> Result<(), HostError> {
        if let Some(code) = self.type_failure {
            return Err(HostError::new(code, "scripted item failure"));
        }
        self.authtok_type = Some(value.to_string());
        Ok(())
    }
}

impl Conversation for ScriptedHost {
    fn acquire_candidate(&mut self) -> Result<Option<SecretString>, HostError> {
        self.candidate_calls += 1;
        let reply = self.candidates.pop_front();
        self.answer(reply)
    }

    fn acquire_confirmation(&mut self) -> Result<Option<SecretString>, HostError> {
        self.confirmation_calls += 1;
        let reply = self.confirmations.pop_front();
        self.answer(reply)
    }

    fn display_error(&mut self, message: &str) {
        self.errors.push(message.to_string());
    }
}

/// Engine that returns scripted verdicts, then accepts everything.
#[derive(Debug, Default)]
pub struct ScriptedEngine {
    verdicts: RefCell<VecDeque<Verdict>>,
    evaluations: Cell<u32>,
    priors: RefCell<Vec<Option<String>>>,
    pub options: Vec<String>,
    /// Options `set_option` refuses.
    pub refuse: Vec<String>,
    drops: Option<Rc<Cell<u32>>>,
}

impl ScriptedEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn verdict(self, verdict: Verdict) -> Self {
        self.verdicts.borrow_mut().push_back(verdict);
        self
    }

    pub fn refusing(mut self, option: &str) -> Self {
        self.refuse.push(option.to_string());
        self
    }

    /// Count drops of this engine into `counter`.
    pub fn tracking_drops(mut self, counter: Rc<Cell<u32>>) -> Self {
        self.drops = Some(counter);
        self
    }

    pub fn evaluations(&self) -> u32 {
        self.evaluations.get()
    }

    /// Prior secrets seen by each evaluation, in order.
    pub fn priors(&self) -> Vec<Option<String>> {
        self.priors.borrow().clone()
    }
}

impl QualityEngine for ScriptedEngine {
    fn set_option(&mut self, option: &str) -> Result<(), EngineOptionError> {
        if self.refuse.iter().any(|r| r == option) {
            return Err(EngineOptionError::UnknownSetting(option.to_string()));
        }
        self.options.push(option.to_string());
        Ok(())
    }

    fn evaluate(&self, _candidate: &SecretString, prior: Option<&SecretString>) -> Verdict {
        self.evaluations.set(self.evaluations.get() + 1);
        self.priors
            .borrow_mut()
            .push(prior.map(|p| p.expose_secret().to_string()));
        self.verdicts
            .borrow_mut()
            .pop_front()
            .unwrap_or(Verdict::Accepted { score: 50 })
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        if let Some(counter) = &self.drops {
            counter.set(counter.get() + 1);
        }
    }
}

/// Factory handing out one prepared engine, or failing allocation.
#[derive(Debug, Default)]
pub struct ScriptedFactory {
    engine: RefCell<Option<ScriptedEngine>>,
    pub allocations: Cell<u32>,
}

impl ScriptedFactory {
    pub fn with_engine(engine: ScriptedEngine) -> Self {
        Self {
            engine: RefCell::new(Some(engine)),
            allocations: Cell::new(0),
        }
    }

    /// Every allocation fails.
    pub fn exhausted() -> Self {
        Self::default()
    }
}

impl EngineFactory for ScriptedFactory {
    type Engine = ScriptedEngine;

    fn allocate(&self) -> Option<ScriptedEngine> {
        self.allocations.set(self.allocations.get() + 1);
        self.engine.borrow_mut().take()
    }
}

pub fn context(engine: ScriptedEngine, retry: u32) -> PolicyContext<ScriptedEngine> {
    PolicyContext::new(engine, retry, false)
}
