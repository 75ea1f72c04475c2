use crate::directive::{DEFAULT_RETRY, Directive};
use crate::model::PwgateConfigV1;
use serde::Serialize;

/// Policy after layering config values and directives. Engine options are not yet applied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedPolicy {
    pub retry: u32,
    pub debug: bool,
    pub authtok_type: Option<String>,
    /// Options for the quality engine, config entries first, then directives in order.
    pub engine_options: Vec<String>,
    /// Compatibility directives that were accepted and ignored.
    pub ignored: Vec<String>,
}

impl Default for ResolvedPolicy {
    fn default() -> Self {
        Self {
            retry: DEFAULT_RETRY,
            debug: false,
            authtok_type: None,
            engine_options: Vec::new(),
            ignored: Vec::new(),
        }
    }
}

pub fn resolve_policy(cfg: &PwgateConfigV1, directives: &[Directive]) -> ResolvedPolicy {
    let mut policy = ResolvedPolicy::default();

    if let Some(retry) = cfg.retry {
        policy.retry = u32::try_from(retry)
            .ok()
            .filter(|n| *n >= 1)
            .unwrap_or(DEFAULT_RETRY);
    }
    if let Some(debug) = cfg.debug {
        policy.debug = debug;
    }
    policy.authtok_type = cfg.authtok_type.clone();
    policy.engine_options = cfg
        .engine
        .iter()
        .filter_map(|(key, value)| value.to_option(key))
        .collect();

    // Later directives win.
    for directive in directives {
        match directive {
            Directive::Debug => policy.debug = true,
            Directive::AuthtokType(t) => policy.authtok_type = Some(t.clone()),
            Directive::Retry(n) => policy.retry = *n,
            Directive::Ignored(token) => policy.ignored.push(token.clone()),
            Directive::Engine(option) => policy.engine_options.push(option.clone()),
        }
    }

    policy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_config_toml, parse_directives};

    #[test]
    fn empty_inputs_use_defaults() {
        let policy = resolve_policy(&PwgateConfigV1::default(), &[]);
        assert_eq!(policy, ResolvedPolicy::default());
        assert_eq!(policy.retry, 1);
    }

    #[test]
    fn directives_override_config() {
        let cfg = parse_config_toml(
            r#"
retry = 2
authtok_type = "LDAP"

[engine]
minlen = 10
dictcheck = false
enforce_for_root = true
badwords = "acme"
"#,
        )
        .expect("parse config");

        let directives = parse_directives(&["retry=5", "type=UNIX", "minclass=3", "use_authtok"]);
        let policy = resolve_policy(&cfg, &directives);

        assert_eq!(policy.retry, 5);
        assert_eq!(policy.authtok_type.as_deref(), Some("UNIX"));
        assert_eq!(
            policy.engine_options,
            vec![
                "badwords=acme".to_string(),
                "enforce_for_root".to_string(),
                "minlen=10".to_string(),
                "minclass=3".to_string(),
            ]
        );
        assert_eq!(policy.ignored, vec!["use_authtok".to_string()]);
        assert!(!policy.debug);
    }

    #[test]
    fn non_positive_config_retry_falls_back() {
        let cfg = parse_config_toml("retry = -2").expect("parse config");
        assert_eq!(resolve_policy(&cfg, &[]).retry, 1);
    }

    #[test]
    fn debug_directive_enables_debug() {
        let cfg = parse_config_toml("debug = false").expect("parse config");
        let policy = resolve_policy(&cfg, &parse_directives(&["debug"]));
        assert!(policy.debug);
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(parse_config_toml("retry = [1, 2]").is_err());
        assert!(parse_config_toml("[engine]\nminlen = 1.5").is_err());
    }
}
