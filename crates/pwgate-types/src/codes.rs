//! Host framework constants.
//!
//! Values match `<security/_pam_types.h>` so a C shim can pass them through unchanged.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;

/// Return code handed back to the host framework.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct PamCode(i32);

impl PamCode {
    pub const SUCCESS: PamCode = PamCode(0);
    pub const SERVICE_ERR: PamCode = PamCode(3);
    pub const SYSTEM_ERR: PamCode = PamCode(4);
    pub const BUF_ERR: PamCode = PamCode(5);
    pub const MAXTRIES: PamCode = PamCode(11);
    pub const CONV_ERR: PamCode = PamCode(19);
    pub const AUTHTOK_ERR: PamCode = PamCode(20);
    pub const AUTHTOK_RECOVERY_ERR: PamCode = PamCode(21);
    pub const TRY_AGAIN: PamCode = PamCode(24);
    pub const ABORT: PamCode = PamCode(26);
    pub const BAD_ITEM: PamCode = PamCode(29);

    pub const fn from_raw(raw: i32) -> Self {
        PamCode(raw)
    }

    pub const fn as_raw(self) -> i32 {
        self.0
    }

    pub fn is_success(self) -> bool {
        self == PamCode::SUCCESS
    }

    /// Symbolic name, or `None` for codes this crate does not name.
    pub fn name(self) -> Option<&'static str> {
        let name = match self {
            PamCode::SUCCESS => "PAM_SUCCESS",
            PamCode::SERVICE_ERR => "PAM_SERVICE_ERR",
            PamCode::SYSTEM_ERR => "PAM_SYSTEM_ERR",
            PamCode::BUF_ERR => "PAM_BUF_ERR",
            PamCode::MAXTRIES => "PAM_MAXTRIES",
            PamCode::CONV_ERR => "PAM_CONV_ERR",
            PamCode::AUTHTOK_ERR => "PAM_AUTHTOK_ERR",
            PamCode::AUTHTOK_RECOVERY_ERR => "PAM_AUTHTOK_RECOVERY_ERR",
            PamCode::TRY_AGAIN => "PAM_TRY_AGAIN",
            PamCode::ABORT => "PAM_ABORT",
            PamCode::BAD_ITEM => "PAM_BAD_ITEM",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for PamCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name} ({})", self.0),
            None => write!(f, "PAM code {}", self.0),
        }
    }
}

/// Invocation flags passed by the host to the password-change entry point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct PamFlags(u32);

impl PamFlags {
    pub const NONE: PamFlags = PamFlags(0);
    pub const CHANGE_EXPIRED_AUTHTOK: PamFlags = PamFlags(0x0020);
    pub const UPDATE_AUTHTOK: PamFlags = PamFlags(0x2000);
    pub const PRELIM_CHECK: PamFlags = PamFlags(0x4000);
    pub const SILENT: PamFlags = PamFlags(0x8000);

    pub const fn from_bits(bits: u32) -> Self {
        PamFlags(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: PamFlags) -> bool {
        other.0 != 0 && self.0 & other.0 == other.0
    }
}

impl BitOr for PamFlags {
    type Output = PamFlags;

    fn bitor(self, rhs: PamFlags) -> PamFlags {
        PamFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for PamFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}", self.0)
    }
}
