use crate::reason::RejectReason;

/// Quality engine judgment on one candidate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Accepted; `score` is informational only.
    Accepted { score: i32 },
    Rejected {
        reason: RejectReason,
        /// Free-text diagnostic from the engine. Only shown for dictionary rejections.
        diagnostic: Option<String>,
    },
}

impl Verdict {
    /// Interpret a raw engine return value: negative is a rejection code, anything else a score.
    pub fn from_raw(raw: i32, diagnostic: Option<String>) -> Self {
        if raw < 0 {
            Verdict::Rejected {
                reason: RejectReason::from_code(raw),
                diagnostic,
            }
        } else {
            Verdict::Accepted { score: raw }
        }
    }

    pub fn rejected(reason: RejectReason) -> Self {
        Verdict::Rejected {
            reason,
            diagnostic: None,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted { .. })
    }
}
