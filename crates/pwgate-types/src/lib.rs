//! Stable types shared across the pwgate workspace.
//!
//! This crate is intentionally boring:
//! - host framework return codes and invocation flags (bit-for-bit Linux-PAM values)
//! - quality engine reason codes
//! - the engine verdict

#![forbid(unsafe_code)]

pub mod codes;
pub mod reason;
pub mod verdict;

pub use codes::{PamCode, PamFlags};
pub use reason::{RejectReason, all_reasons};
pub use verdict::Verdict;
