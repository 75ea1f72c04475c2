//! Pure password-change ceremony logic (no IO).
//!
//! Input: a policy context and a host implementing the session and conversation seams.
//! Output: the host return code plus a small report of what happened.

#![forbid(unsafe_code)]

pub mod classify;
pub mod host;
pub mod policy;

mod ceremony;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

#[cfg(test)]
mod proptest;

pub use ceremony::{CeremonyReport, CeremonyState, Phase, run_ceremony};
pub use classify::classify;
