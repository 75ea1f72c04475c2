//! The `explain` use case: look up what users are told for an engine reason code.

use pwgate_domain::classify;
use pwgate_types::{RejectReason, all_reasons};
use serde::Serialize;

/// One row of the reason table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReasonEntry {
    pub code: i32,
    pub name: &'static str,
    pub message: &'static str,
}

impl ReasonEntry {
    fn of(reason: RejectReason) -> Self {
        Self {
            code: reason.code(),
            name: reason.name(),
            message: classify(reason, None),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(ReasonEntry),
    /// Not a code and not a known name.
    NotFound {
        identifier: String,
        available: Vec<ReasonEntry>,
    },
}

/// Every known reason with its message, in code order.
pub fn reason_table() -> Vec<ReasonEntry> {
    all_reasons().iter().copied().map(ReasonEntry::of).collect()
}

/// Look up a reason by numeric code or name. Unknown numeric codes are still "found": they map
/// to the generic message.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match RejectReason::lookup(identifier) {
        Some(reason) => ExplainOutput::Found(ReasonEntry::of(reason)),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: reason_table(),
        },
    }
}

/// Format an entry for terminal display.
pub fn format_explanation(entry: &ReasonEntry) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", entry.name, entry.code));
    out.push_str(&classify::bad_password(entry.message));
    out.push('\n');
    if entry.code == RejectReason::DictionaryCheck.code() {
        out.push_str("(the engine's own diagnostic replaces this message when it provides one)\n");
    }
    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[ReasonEntry]) -> String {
    let mut out = String::new();
    out.push_str(&format!("Unknown reason code or name: {}\n\n", identifier));
    out.push_str("Available reasons:\n");
    for entry in available {
        out.push_str(&format!("  {:>4}  {}\n", entry.code, entry.name));
    }
    out
}
