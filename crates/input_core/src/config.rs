// crates/input_core/src/config.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use input_shared::Channel;
use serde::{Deserialize, Serialize};

use crate::error::{InputError, Result};
use crate::source::MAIN_MAP;

/// Which raw action each channel listens to.
///
/// ```ron
/// (
///     action_map: "Main",
///     bindings: { Click: "Fire", Value2: "Move" },
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub action_map: String,
    pub bindings: BTreeMap<Channel, String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            action_map: MAIN_MAP.to_string(),
            bindings: Channel::ALL
                .iter()
                .map(|&c| (c, c.name().to_string()))
                .collect(),
        }
    }
}

impl InputConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| InputError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&text)
    }

    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// `"<map>/<action>"`; channels without a binding use their own name.
    pub fn action_path(&self, channel: Channel) -> String {
        let action = self
            .bindings
            .get(&channel)
            .map(String::as_str)
            .unwrap_or_else(|| channel.name());
        format!("{}/{}", self.action_map, action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_main_actions() {
        let config = InputConfig::default();
        assert_eq!(config.action_path(Channel::Click), "Main/Click");
        assert_eq!(config.action_path(Channel::Value3), "Main/Value3");
    }

    #[test]
    fn partial_config_falls_back_to_channel_names() {
        let config = InputConfig::from_ron_str(
            r#"(action_map: "Player", bindings: { Click: "Fire", Value2: "Move" })"#,
        )
        .expect("valid config");

        assert_eq!(config.action_path(Channel::Click), "Player/Fire");
        assert_eq!(config.action_path(Channel::Value2), "Player/Move");
        assert_eq!(config.action_path(Channel::Hold), "Player/Hold");
    }

    #[test]
    fn empty_config_is_default_map() {
        let config = InputConfig::from_ron_str("()").expect("empty tuple is valid");
        assert_eq!(config, InputConfig::default());
    }

    #[test]
    fn malformed_config_is_parse_error() {
        let err = InputConfig::from_ron_str("(action_map: 3)").unwrap_err();
        assert!(matches!(err, InputError::ConfigParse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = InputConfig::load("definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, InputError::ConfigIo { .. }));
    }

    #[test]
    fn written_config_reads_back() {
        let mut config = InputConfig::default();
        config.bindings.insert(Channel::Value1, "Throttle".to_string());
        let text = config.to_ron_string().expect("serialize");
        assert_eq!(InputConfig::from_ron_str(&text).expect("parse"), config);
    }
}
