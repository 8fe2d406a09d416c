use std::path::Path;
use std::{env, fs};

use tracing::{info, warn};

use crate::engine::config::EngineConfig;
use crate::error::{Result, SimError};

pub const CONFIG_PATH_ENV: &str = "SB_ENGINE_CONFIG_PATH";

/// Engine configuration for this process.
///
/// Reads the file named by `SB_ENGINE_CONFIG_PATH` when set, otherwise falls
/// back to the `SB_ENGINE_PROFILE` preset.
pub fn load_config_from_env() -> Result<EngineConfig> {
    load_config_from_path_var(env::var(CONFIG_PATH_ENV).ok().as_deref())
}

fn load_config_from_path_var(path: Option<&str>) -> Result<EngineConfig> {
    match path.map(str::trim) {
        Some(path) if !path.is_empty() => load_config_file(path),
        _ => Ok(EngineConfig::from_env_or_default()),
    }
}

/// Load and validate a JSON or YAML (`.yaml`/`.yml`) config file.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<EngineConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        SimError::Config(format!(
            "Failed to read engine config from {CONFIG_PATH_ENV}='{}': {e}",
            path.display()
        ))
    })?;

    let is_yaml = matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml") | Some("yml")
    );
    let config: EngineConfig = if is_yaml {
        serde_yaml::from_str(&content).map_err(|e| {
            let path = path.display();
            SimError::Config(format!("Failed to parse engine config YAML '{path}': {e}"))
        })?
    } else {
        serde_json::from_str(&content).map_err(|e| {
            let path = path.display();
            SimError::Config(format!("Failed to parse engine config JSON '{path}': {e}"))
        })?
    };

    if let Err(e) = config.validate() {
        warn!(path = %path.display(), error = %e, "rejecting engine config");
        return Err(e);
    }
    info!(path = %path.display(), "loaded engine config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_unset_path_uses_defaults() {
        assert_eq!(load_config_from_path_var(None).unwrap(), EngineConfig::from_env_or_default());
        let blank = load_config_from_path_var(Some("  ")).unwrap();
        assert_eq!(blank, EngineConfig::from_env_or_default());
    }

    #[test]
    fn test_load_json_file() {
        let file = write_config(".json", r#"{"rules":{"regulation_innings":7}}"#);
        let config = load_config_from_path_var(file.path().to_str()).unwrap();
        assert_eq!(config.rules.regulation_innings, 7);
        assert_eq!(config.defense, EngineConfig::default().defense);
    }

    #[test]
    fn test_load_yaml_file() {
        let yaml = "rules:\n  walk_off: true\ndefense:\n  enforce_doctrine: false\n";
        let file = write_config(".yaml", yaml);
        let config = load_config_file(file.path()).unwrap();
        assert!(config.rules.walk_off);
        assert!(!config.defense.enforce_doctrine);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let file = write_config(".json", r#"{"rules":{"pitch_cap":0}}"#);
        assert!(matches!(load_config_file(file.path()), Err(SimError::Config(_))));
    }

    #[test]
    fn test_unparseable_file_rejected() {
        let file = write_config(".json", "rules: [");
        let err = load_config_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON"));
    }

    #[test]
    fn test_missing_file_rejected() {
        let err = load_config_file("/nonexistent/sb_engine.json").unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }
}
