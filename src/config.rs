/// Companion configuration
/// Read from the optional `plugins.companion` block of tauri.conf.json.

use serde::Deserialize;
use tauri::AppHandle;

const CONFIG_KEY: &str = "companion";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompanionConfig {
    /// Sidecar binary name, resolved next to the app executable
    pub sidecar: String,
    /// Explicit program path; takes precedence over `sidecar`
    pub program: Option<String>,
    /// Insert assistant text as markup without escaping it
    pub trust_markup: bool,
}

impl Default for CompanionConfig {
    fn default() -> Self {
        Self {
            sidecar: "synapse".to_string(),
            program: None,
            trust_markup: false,
        }
    }
}

impl CompanionConfig {
    /// Load from the app config, falling back to defaults
    pub fn load(app: &AppHandle) -> Self {
        Self::from_value(app.config().plugins.0.get(CONFIG_KEY))
    }

    fn from_value(value: Option<&serde_json::Value>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match serde_json::from_value(value.clone()) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("[Config] Invalid `plugins.{}` block, using defaults: {}", CONFIG_KEY, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_block_uses_defaults() {
        assert_eq!(CompanionConfig::from_value(None), CompanionConfig::default());
    }

    #[test]
    fn partial_block_keeps_other_defaults() {
        let value = json!({ "program": "/opt/synapse/bin/synapse", "trustMarkup": true });
        let config = CompanionConfig::from_value(Some(&value));

        assert_eq!(config.sidecar, "synapse");
        assert_eq!(config.program.as_deref(), Some("/opt/synapse/bin/synapse"));
        assert!(config.trust_markup);
    }

    #[test]
    fn malformed_block_falls_back() {
        let value = json!({ "sidecar": 7 });
        assert_eq!(
            CompanionConfig::from_value(Some(&value)),
            CompanionConfig::default()
        );
    }
}
