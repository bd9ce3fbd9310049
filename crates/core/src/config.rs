//! Wizard configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::CoreError;
use crate::validation::ValidationMode;

/// Default draft freshness window (hours).
pub const DEFAULT_FRESHNESS_HOURS: u64 = 24;

/// Default directory for the directory-backed draft storage.
pub const DEFAULT_DRAFT_DIR: &str = "data/drafts";

/// Runtime settings for a wizard session and its draft persistence.
///
/// Defaults match the registration portal: validation bypassed, drafts kept
/// for 24 hours, no interval autosave.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardConfig {
    pub validation_mode: ValidationMode,
    pub draft_dir: PathBuf,
    pub draft_freshness: Duration,
    /// Interval autosave; `None` saves only on explicit request.
    pub autosave_interval: Option<Duration>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            validation_mode: ValidationMode::default(),
            draft_dir: PathBuf::from(DEFAULT_DRAFT_DIR),
            draft_freshness: Duration::from_secs(DEFAULT_FRESHNESS_HOURS * 3600),
            autosave_interval: None,
        }
    }
}

impl WizardConfig {
    /// Strict validation with all other settings at their defaults.
    pub fn strict() -> Self {
        Self {
            validation_mode: ValidationMode::Strict,
            ..Self::default()
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                        | Default       |
    /// |--------------------------------|---------------|
    /// | `NCAHP_VALIDATION_MODE`        | `bypass`      |
    /// | `NCAHP_DRAFT_DIR`              | `data/drafts` |
    /// | `NCAHP_DRAFT_FRESHNESS_HOURS`  | `24`          |
    /// | `NCAHP_AUTOSAVE_INTERVAL_SECS` | unset (off)   |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let validation_mode = match lookup("NCAHP_VALIDATION_MODE") {
            Some(raw) => ValidationMode::from_str_config(&raw)?,
            None => defaults.validation_mode,
        };

        let draft_dir = lookup("NCAHP_DRAFT_DIR")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.draft_dir);

        let draft_freshness = match lookup("NCAHP_DRAFT_FRESHNESS_HOURS") {
            Some(raw) => {
                let hours = parse_positive("NCAHP_DRAFT_FRESHNESS_HOURS", &raw)?;
                Duration::from_secs(hours * 3600)
            }
            None => defaults.draft_freshness,
        };

        let autosave_interval = lookup("NCAHP_AUTOSAVE_INTERVAL_SECS")
            .filter(|s| !s.trim().is_empty())
            .map(|raw| parse_positive("NCAHP_AUTOSAVE_INTERVAL_SECS", &raw))
            .transpose()?
            .map(Duration::from_secs);

        Ok(Self {
            validation_mode,
            draft_dir,
            draft_freshness,
            autosave_interval,
        })
    }
}

fn parse_positive(key: &str, raw: &str) -> Result<u64, CoreError> {
    match raw.trim().parse::<u64>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(CoreError::Validation(format!(
            "{key} must be a positive integer, got '{raw}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<WizardConfig, CoreError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        WizardConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config, WizardConfig::default());
        assert_eq!(config.validation_mode, ValidationMode::Bypass);
        assert_eq!(config.draft_freshness, Duration::from_secs(24 * 3600));
        assert!(config.autosave_interval.is_none());
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("NCAHP_VALIDATION_MODE", "strict"),
            ("NCAHP_DRAFT_DIR", "/tmp/drafts"),
            ("NCAHP_DRAFT_FRESHNESS_HOURS", "2"),
            ("NCAHP_AUTOSAVE_INTERVAL_SECS", "30"),
        ])
        .unwrap();
        assert_eq!(config.validation_mode, ValidationMode::Strict);
        assert_eq!(config.draft_dir, PathBuf::from("/tmp/drafts"));
        assert_eq!(config.draft_freshness, Duration::from_secs(7200));
        assert_eq!(config.autosave_interval, Some(Duration::from_secs(30)));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert_matches!(
            config_from(&[("NCAHP_DRAFT_FRESHNESS_HOURS", "0")]),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            config_from(&[("NCAHP_AUTOSAVE_INTERVAL_SECS", "soon")]),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            config_from(&[("NCAHP_VALIDATION_MODE", "off")]),
            Err(CoreError::Validation(_))
        );
    }
}
