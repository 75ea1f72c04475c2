//! Seams to the host framework and the quality engine.
//!
//! The ceremony driver only talks to these traits; a host adapter implements them over the real
//! framework handle.

use pwgate_types::{PamCode, Verdict};
use secrecy::SecretString;

/// A host call that failed. `code` is the host's own return code and is passed back verbatim
/// when it ends up being the final outcome.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({code})")]
pub struct HostError {
    pub code: PamCode,
    pub message: String,
}

impl HostError {
    pub fn new(code: PamCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// The host's per-session item store.
pub trait SessionItems {
    /// Prior secret, if the host has one.
    fn old_authtok(&self) -> Result<Option<SecretString>, HostError>;

    /// Write (`Some`) or clear (`None`) the pending new secret.
    fn set_authtok(&mut self, value: Option<&SecretString>) -> Result<(), HostError>;

    fn set_authtok_type(&mut self, value: &str) -> Result<(), HostError>;
}

/// The host's prompting mechanism.
///
/// `Ok(None)` means the user aborted the password change.
pub trait Conversation {
    fn acquire_candidate(&mut self) -> Result<Option<SecretString>, HostError>;

    fn acquire_confirmation(&mut self) -> Result<Option<SecretString>, HostError>;

    fn display_error(&mut self, message: &str);
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineOptionError {
    #[error("unknown setting: {0}")]
    UnknownSetting(String),
    #[error("invalid value for {setting}: {value}")]
    InvalidValue { setting: String, value: String },
}

/// External password quality engine.
pub trait QualityEngine {
    /// Apply one engine-specific option (`minlen=12`, `enforce_for_root`, ...).
    fn set_option(&mut self, option: &str) -> Result<(), EngineOptionError>;

    fn evaluate(&self, candidate: &SecretString, prior: Option<&SecretString>) -> Verdict;
}

/// Allocates an engine with its built-in defaults. `None` means allocation failed.
pub trait EngineFactory {
    type Engine: QualityEngine;

    fn allocate(&self) -> Option<Self::Engine>;
}

/// Whether the invoking principal may override quality rejections.
pub trait Privilege {
    fn is_privileged(&self) -> bool;
}

impl<F: Fn() -> bool> Privilege for F {
    fn is_privileged(&self) -> bool {
        self()
    }
}
