//! TOML configuration for the `rangejoin` binary.
//!
//! ```toml
//! default_join_type = "LEFT"
//! default_has_header = false
//! log_level = "rangejoin_engine=debug"
//! pretty = true
//! ```

use std::path::Path;

use rangejoin::{JoinRequest, Result};
use serde::Deserialize;
use tracing::debug;

/// Fallback filter when neither the environment nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Join type for requests that do not name one.
    pub default_join_type: Option<String>,
    /// Header flag for requests that do not set one.
    pub default_has_header: Option<bool>,
    /// `tracing-subscriber` filter directive.
    pub log_level: Option<String>,
    /// Pretty-print the JSON output.
    pub pretty: bool,
}

impl CliConfig {
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> std::result::Result<Self, String> {
        let text = std::fs::read_to_string(path)
            .map_err(|error| format!("cannot read config {}: {error}", path.display()))?;
        Self::from_toml(&text).map_err(|error| format!("{}: {error}", path.display()))
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    /// Fill the fields `request` leaves unset. Blank requests stay blank.
    pub fn apply(&self, request: &mut JoinRequest) {
        if request.is_blank() {
            return;
        }
        if request.join_type.is_none() {
            request.join_type.clone_from(&self.default_join_type);
        }
        if request.has_header.is_none() {
            request.has_header = self.default_has_header;
        }
        debug!(
            join_type = ?request.join_type,
            has_header = ?request.has_header,
            "request defaults applied"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangejoin::{JoinError, JoinType, Range};
    use std::io::Write;

    fn request() -> JoinRequest {
        JoinRequest::new(
            Range::from_grid([["id"], ["1"]]),
            Range::from_grid([["id"], ["1"]]),
        )
        .on(1, 1)
    }

    #[test]
    fn load_reads_every_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "default_join_type = \"left\"\ndefault_has_header = false\nlog_level = \"debug\"\npretty = true"
        )
        .unwrap();

        let config = CliConfig::load(file.path()).unwrap();
        assert_eq!(
            config,
            CliConfig {
                default_join_type: Some("left".to_owned()),
                default_has_header: Some(false),
                log_level: Some("debug".to_owned()),
                pretty: true,
            }
        );
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn empty_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rangejoin.toml");
        std::fs::write(&path, "").unwrap();

        let config = CliConfig::load(&path).unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.log_level(), DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn unknown_keys_are_config_errors() {
        let err = CliConfig::from_toml("join = \"LEFT\"").unwrap_err();
        assert!(matches!(err, JoinError::Config(_)));
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = CliConfig::load(&path).unwrap_err();
        assert!(err.contains("absent.toml"), "err={err}");
    }

    #[test]
    fn apply_fills_only_unset_fields() {
        let config = CliConfig {
            default_join_type: Some("LEFT".to_owned()),
            default_has_header: Some(false),
            ..CliConfig::default()
        };

        let mut unset = request();
        config.apply(&mut unset);
        assert_eq!(unset.join_type.as_deref(), Some("LEFT"));
        assert_eq!(unset.has_header, Some(false));

        let mut explicit = request().join_type(JoinType::Inner).has_header(true);
        config.apply(&mut explicit);
        assert_eq!(explicit.join_type.as_deref(), Some("INNER"));
        assert_eq!(explicit.has_header, Some(true));
    }

    #[test]
    fn apply_leaves_blank_request_blank() {
        let config = CliConfig {
            default_join_type: Some("LEFT".to_owned()),
            ..CliConfig::default()
        };
        let mut blank = JoinRequest::default();
        config.apply(&mut blank);
        assert!(blank.is_blank());
    }
}
