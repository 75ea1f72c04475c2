//! Config loading. Reading is allowed to fail; the module then runs on defaults.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use pwgate_settings::PwgateConfigV1;

pub const DEFAULT_CONFIG_PATH: &str = "/etc/security/pwgate.toml";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// [`DEFAULT_CONFIG_PATH`]; a missing file means defaults.
    #[default]
    System,
    /// An explicit file that must exist.
    Path(Utf8PathBuf),
    /// Config contents supplied by the caller.
    Text(String),
    Skip,
}

/// Read and parse the configuration, surfacing every failure.
pub fn read_config(source: &ConfigSource) -> anyhow::Result<PwgateConfigV1> {
    let text = match source {
        ConfigSource::System => {
            let path = Utf8Path::new(DEFAULT_CONFIG_PATH);
            match std::fs::read_to_string(path) {
                Ok(text) => text,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    return Ok(PwgateConfigV1::default());
                }
                Err(err) => return Err(err).with_context(|| format!("read config {path}")),
            }
        }
        ConfigSource::Path(path) => {
            std::fs::read_to_string(path).with_context(|| format!("read config {path}"))?
        }
        ConfigSource::Text(text) => text.clone(),
        ConfigSource::Skip => return Ok(PwgateConfigV1::default()),
    };

    // Empty is allowed, defaults apply.
    if text.trim().is_empty() {
        return Ok(PwgateConfigV1::default());
    }
    pwgate_settings::parse_config_toml(&text).context("parse config")
}

/// Like [`read_config`], but failures are logged and replaced by defaults.
pub fn load_config(source: &ConfigSource) -> PwgateConfigV1 {
    read_config(source).unwrap_or_else(|err| {
        tracing::error!(error = format!("{err:#}"), "reading pwgate configuration failed");
        PwgateConfigV1::default()
    })
}
