//! Quality engine rejection reasons.
//!
//! Numeric codes follow libpwquality's `PWQ_ERROR_*` values. `name` is a short snake_case
//! discriminator used by tooling.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const PWQ_ERROR_MEM_ALLOC: i32 = -8;
pub const PWQ_ERROR_TOO_SIMILAR: i32 = -9;
pub const PWQ_ERROR_MIN_DIGITS: i32 = -10;
pub const PWQ_ERROR_MIN_UPPERS: i32 = -11;
pub const PWQ_ERROR_MIN_LOWERS: i32 = -12;
pub const PWQ_ERROR_MIN_OTHERS: i32 = -13;
pub const PWQ_ERROR_MIN_LENGTH: i32 = -14;
pub const PWQ_ERROR_PALINDROME: i32 = -15;
pub const PWQ_ERROR_CASE_CHANGES_ONLY: i32 = -16;
pub const PWQ_ERROR_ROTATED: i32 = -17;
pub const PWQ_ERROR_MIN_CLASSES: i32 = -18;
pub const PWQ_ERROR_MAX_CONSECUTIVE: i32 = -19;
pub const PWQ_ERROR_EMPTY_PASSWORD: i32 = -20;
pub const PWQ_ERROR_SAME_PASSWORD: i32 = -21;
pub const PWQ_ERROR_CRACKLIB_CHECK: i32 = -22;

/// Why the quality engine rejected a candidate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    MemAlloc,
    TooSimilar,
    MinDigits,
    MinUppers,
    MinLowers,
    MinOthers,
    MinLength,
    Palindrome,
    CaseChangesOnly,
    Rotated,
    MinClasses,
    MaxConsecutive,
    EmptyPassword,
    SamePassword,
    /// External dictionary check; the engine supplies its own diagnostic text.
    DictionaryCheck,
    /// A code this crate does not know about (future engine versions, settings errors).
    Other(i32),
}

const KNOWN: &[RejectReason] = &[
    RejectReason::MemAlloc,
    RejectReason::TooSimilar,
    RejectReason::MinDigits,
    RejectReason::MinUppers,
    RejectReason::MinLowers,
    RejectReason::MinOthers,
    RejectReason::MinLength,
    RejectReason::Palindrome,
    RejectReason::CaseChangesOnly,
    RejectReason::Rotated,
    RejectReason::MinClasses,
    RejectReason::MaxConsecutive,
    RejectReason::EmptyPassword,
    RejectReason::SamePassword,
    RejectReason::DictionaryCheck,
];

/// Every reason with a dedicated code, in code order.
pub fn all_reasons() -> &'static [RejectReason] {
    KNOWN
}

impl RejectReason {
    pub fn from_code(code: i32) -> Self {
        match code {
            PWQ_ERROR_MEM_ALLOC => RejectReason::MemAlloc,
            PWQ_ERROR_TOO_SIMILAR => RejectReason::TooSimilar,
            PWQ_ERROR_MIN_DIGITS => RejectReason::MinDigits,
            PWQ_ERROR_MIN_UPPERS => RejectReason::MinUppers,
            PWQ_ERROR_MIN_LOWERS => RejectReason::MinLowers,
            PWQ_ERROR_MIN_OTHERS => RejectReason::MinOthers,
            PWQ_ERROR_MIN_LENGTH => RejectReason::MinLength,
            PWQ_ERROR_PALINDROME => RejectReason::Palindrome,
            PWQ_ERROR_CASE_CHANGES_ONLY => RejectReason::CaseChangesOnly,
            PWQ_ERROR_ROTATED => RejectReason::Rotated,
            PWQ_ERROR_MIN_CLASSES => RejectReason::MinClasses,
            PWQ_ERROR_MAX_CONSECUTIVE => RejectReason::MaxConsecutive,
            PWQ_ERROR_EMPTY_PASSWORD => RejectReason::EmptyPassword,
            PWQ_ERROR_SAME_PASSWORD => RejectReason::SamePassword,
            PWQ_ERROR_CRACKLIB_CHECK => RejectReason::DictionaryCheck,
            other => RejectReason::Other(other),
        }
    }

    pub fn code(self) -> i32 {
        match self {
            RejectReason::MemAlloc => PWQ_ERROR_MEM_ALLOC,
            RejectReason::TooSimilar => PWQ_ERROR_TOO_SIMILAR,
            RejectReason::MinDigits => PWQ_ERROR_MIN_DIGITS,
            RejectReason::MinUppers => PWQ_ERROR_MIN_UPPERS,
            RejectReason::MinLowers => PWQ_ERROR_MIN_LOWERS,
            RejectReason::MinOthers => PWQ_ERROR_MIN_OTHERS,
            RejectReason::MinLength => PWQ_ERROR_MIN_LENGTH,
            RejectReason::Palindrome => PWQ_ERROR_PALINDROME,
            RejectReason::CaseChangesOnly => PWQ_ERROR_CASE_CHANGES_ONLY,
            RejectReason::Rotated => PWQ_ERROR_ROTATED,
            RejectReason::MinClasses => PWQ_ERROR_MIN_CLASSES,
            RejectReason::MaxConsecutive => PWQ_ERROR_MAX_CONSECUTIVE,
            RejectReason::EmptyPassword => PWQ_ERROR_EMPTY_PASSWORD,
            RejectReason::SamePassword => PWQ_ERROR_SAME_PASSWORD,
            RejectReason::DictionaryCheck => PWQ_ERROR_CRACKLIB_CHECK,
            RejectReason::Other(code) => code,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RejectReason::MemAlloc => "mem_alloc",
            RejectReason::TooSimilar => "too_similar",
            RejectReason::MinDigits => "min_digits",
            RejectReason::MinUppers => "min_uppers",
            RejectReason::MinLowers => "min_lowers",
            RejectReason::MinOthers => "min_others",
            RejectReason::MinLength => "min_length",
            RejectReason::Palindrome => "palindrome",
            RejectReason::CaseChangesOnly => "case_changes_only",
            RejectReason::Rotated => "rotated",
            RejectReason::MinClasses => "min_classes",
            RejectReason::MaxConsecutive => "max_consecutive",
            RejectReason::EmptyPassword => "empty_password",
            RejectReason::SamePassword => "same_password",
            RejectReason::DictionaryCheck => "dictionary_check",
            RejectReason::Other(_) => "other",
        }
    }

    /// Look up a reason by numeric code (`-14`) or name (`min_length`).
    pub fn lookup(identifier: &str) -> Option<Self> {
        let identifier = identifier.trim();
        if let Ok(code) = identifier.parse::<i32>() {
            return Some(RejectReason::from_code(code));
        }
        KNOWN.iter().copied().find(|r| r.name() == identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_round_trip() {
        for reason in all_reasons() {
            assert_eq!(RejectReason::from_code(reason.code()), *reason);
        }
    }

    #[test]
    fn unknown_codes_are_preserved() {
        assert_eq!(RejectReason::from_code(-99), RejectReason::Other(-99));
        assert_eq!(RejectReason::Other(-99).code(), -99);
    }

    #[test]
    fn lookup_accepts_codes_and_names() {
        assert_eq!(RejectReason::lookup("-14"), Some(RejectReason::MinLength));
        assert_eq!(
            RejectReason::lookup("dictionary_check"),
            Some(RejectReason::DictionaryCheck)
        );
        assert_eq!(RejectReason::lookup("-1"), Some(RejectReason::Other(-1)));
        assert_eq!(RejectReason::lookup("other"), None);
        assert_eq!(RejectReason::lookup("nope"), None);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&RejectReason::CaseChangesOnly).expect("serialize");
        assert_eq!(json, "\"case_changes_only\"");
    }
}
