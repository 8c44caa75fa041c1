use crate::{
    error::{ConfigParseSnafu, ConfigReadSnafu, Result},
    mode::Mode,
};
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::path::Path;

/// Session configuration loaded from RON.
///
/// ```ron
/// (
///     namespace: "sistrum",
///     initial_mode: Extension,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Prefix of command ids and context keys.
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Mode entered when the session is activated.
    #[serde(default)]
    pub initial_mode: Mode,
}

fn default_namespace() -> String {
    "sistrum".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            initial_mode: Mode::default(),
        }
    }
}

impl SessionConfig {
    pub fn from_ron(ron_str: &str) -> Result<Self> {
        ron::from_str(ron_str).context(ConfigParseSnafu)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).context(ConfigReadSnafu { path })?;
        Self::from_ron(&contents)
    }

    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Context key holding the current mode name.
    pub fn mode_key(&self) -> String {
        format!("{}.mode", self.namespace)
    }

    /// Context key set once the session is active.
    pub fn enabled_key(&self) -> String {
        format!("{}.enabled", self.namespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.namespace, "sistrum");
        assert_eq!(config.initial_mode, Mode::Extension);
        assert_eq!(config.mode_key(), "sistrum.mode");
        assert_eq!(config.enabled_key(), "sistrum.enabled");
    }

    #[test]
    fn test_parse_partial_config() {
        let config = SessionConfig::from_ron("(initial_mode: Code)").unwrap();
        assert_eq!(config.namespace, "sistrum");
        assert_eq!(config.initial_mode, Mode::Code);

        let config = SessionConfig::from_ron(r#"(namespace: "modal")"#).unwrap();
        assert_eq!(config.mode_key(), "modal.mode");
        assert_eq!(config.initial_mode, Mode::Extension);
    }

    #[test]
    fn test_config_serialization() {
        let config = SessionConfig {
            namespace: "ed".into(),
            initial_mode: Mode::Overtype,
        };
        let ron_str = config.to_ron().expect("Failed to serialize config to RON");
        let parsed = SessionConfig::from_ron(&ron_str).expect("Failed to parse config from RON");
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            SessionConfig::from_ron("(initial_mode: Sideways)"),
            Err(Error::ConfigParse { .. })
        ));
        assert!(matches!(
            SessionConfig::from_file(Path::new("/nonexistent/sistrum.ron")),
            Err(Error::ConfigRead { .. })
        ));
    }
}
