//! Verdict classification: engine reason codes to user-facing messages.

use pwgate_types::RejectReason;

/// Shown for reason codes without a dedicated message.
pub const GENERIC_FAILURE: &str = "Error in service module";

pub const MISTYPED_PASS: &str = "Sorry, passwords do not match.";

const TOO_SIMPLE: &str = "is too simple";

/// Map a rejection to the message shown to the user.
///
/// Character-class and length deficiencies all read "is too simple" on purpose. Dictionary
/// rejections show the engine's own diagnostic verbatim, or the generic message if it sent none.
pub fn classify<'a>(reason: RejectReason, diagnostic: Option<&'a str>) -> &'a str {
    match reason {
        RejectReason::MemAlloc => "memory allocation error",
        RejectReason::SamePassword => "is the same as the old one",
        RejectReason::Palindrome => "is a palindrome",
        RejectReason::CaseChangesOnly => "case changes only",
        RejectReason::TooSimilar => "is too similar to the old one",
        RejectReason::MinDigits
        | RejectReason::MinUppers
        | RejectReason::MinLowers
        | RejectReason::MinOthers
        | RejectReason::MinLength => TOO_SIMPLE,
        RejectReason::Rotated => "is rotated",
        RejectReason::MinClasses => "not enough character classes",
        RejectReason::MaxConsecutive => "contains too many same characters consecutively",
        RejectReason::EmptyPassword => "No password supplied",
        RejectReason::DictionaryCheck => diagnostic.unwrap_or(GENERIC_FAILURE),
        RejectReason::Other(_) => GENERIC_FAILURE,
    }
}

/// Format a classified message for the host error display.
pub fn bad_password(message: &str) -> String {
    format!("BAD PASSWORD: {message}")
}
