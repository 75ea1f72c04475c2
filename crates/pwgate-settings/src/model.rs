use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// `pwgate.toml` schema v1.
///
/// Every field is optional: an empty file (or no file) means "module defaults".
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PwgateConfigV1 {
    /// Optional schema string for tooling (`pwgate.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Default retry budget. Values below 1 fall back to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,

    /// Credential-type hint shown in host prompts (e.g. `UNIX`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authtok_type: Option<String>,

    /// Quality engine settings, forwarded to the engine as options.
    #[serde(default)]
    pub engine: BTreeMap<String, EngineValue>,
}

/// A scalar engine setting.
///
/// `true` forwards the bare key (`enforce_for_root`), `false` forwards nothing, other values
/// forward `key=value`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum EngineValue {
    Flag(bool),
    Integer(i64),
    Text(String),
}

impl EngineValue {
    pub fn to_option(&self, key: &str) -> Option<String> {
        match self {
            EngineValue::Flag(true) => Some(key.to_string()),
            EngineValue::Flag(false) => None,
            EngineValue::Integer(n) => Some(format!("{key}={n}")),
            EngineValue::Text(s) => Some(format!("{key}={s}")),
        }
    }
}
