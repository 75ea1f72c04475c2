//! Use case orchestration for pwgate.
//!
//! This crate provides the application layer: it wires configuration, the quality engine, and
//! the host seams together and hands control to the domain ceremony. It is intentionally thin.
//!
//! Host adapters and the CLI depend on this; they only handle their own I/O.

#![forbid(unsafe_code)]

mod chauthtok;
mod config;
mod explain;
mod privilege;
mod resolve;

pub use chauthtok::{ChauthtokInput, run_chauthtok};
pub use config::{ConfigSource, DEFAULT_CONFIG_PATH, load_config, read_config};
pub use explain::{
    ExplainOutput, ReasonEntry, format_explanation, format_not_found, reason_table, run_explain,
};
pub use privilege::EffectiveUid;
pub use resolve::{ResolveOutput, run_resolve};
