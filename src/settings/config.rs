// Settings configuration

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info, warn};

use super::error::ConfigError;
use super::types::{EmbeddingModelOption, RetrievalConfiguration};
use super::validation::validate_configuration;

pub const ENV_CHUNK_SIZE: &str = "RAG_CHUNK_SIZE";
pub const ENV_OVERLAP_SIZE: &str = "RAG_OVERLAP_SIZE";
pub const ENV_EMBEDDING_MODEL: &str = "RAG_EMBEDDING_MODEL";
pub const ENV_TOP_K: &str = "RAG_TOP_K";
pub const ENV_VALIDATE: &str = "RAG_SETTINGS_VALIDATE";
pub const ENV_SETTINGS_FILE: &str = "RAG_SETTINGS_FILE";

/// Store construction options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsConfig {
    /// Reject out-of-range values and unknown models on write
    pub validate: bool,
    /// Initial record, including the model catalog
    pub initial: RetrievalConfiguration,
}

/// On-disk layout of a settings file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    validate: Option<bool>,
    #[serde(default)]
    defaults: DefaultsSection,
    embedding_models: Option<Vec<EmbeddingModelOption>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct DefaultsSection {
    chunk_size: Option<i64>,
    overlap_size: Option<i64>,
    embedding_model: Option<String>,
    top_k: Option<i64>,
}

/// Parse a variable from `lookup`, logging a warning if the value is present but invalid.
fn parse_var<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &str,
    default: T,
) -> T {
    match lookup(name) {
        Some(v) => match v.trim().parse() {
            Ok(parsed) => parsed,
            Err(_) => {
                warn!(var = name, value = %v, "Invalid env var value, using default");
                default
            }
        },
        None => default,
    }
}

impl SettingsConfig {
    /// Load from `.env`, the process environment and an optional settings file
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let file = std::env::var(ENV_SETTINGS_FILE).ok().map(PathBuf::from);
        Self::load(file.as_deref(), |name| std::env::var(name).ok())
    }

    /// Build from an optional file, then apply overrides from `lookup`
    pub fn load(
        file: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let config = match file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_overrides(lookup);

        if config.validate {
            validate_configuration(&config.initial)?;
        }

        info!(
            validate = config.validate,
            chunk_size = config.initial.chunk_size,
            overlap_size = config.initial.overlap_size,
            embedding_model = %config.initial.embedding_model,
            top_k = config.initial.top_k,
            models = config.initial.embedding_models.len(),
            "Settings configuration loaded"
        );

        Ok(config)
    }

    /// Read a TOML settings file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        debug!(path = %path.display(), "loaded settings file");
        Ok(config)
    }

    /// Parse TOML text; absent keys keep the built-in defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: SettingsFile = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(validate) = file.validate {
            config.validate = validate;
        }
        let initial = &mut config.initial;
        if let Some(v) = file.defaults.chunk_size {
            initial.chunk_size = v;
        }
        if let Some(v) = file.defaults.overlap_size {
            initial.overlap_size = v;
        }
        if let Some(v) = file.defaults.embedding_model {
            initial.embedding_model = v;
        }
        if let Some(v) = file.defaults.top_k {
            initial.top_k = v;
        }
        if let Some(models) = file.embedding_models {
            initial.embedding_models = models;
        }

        Ok(config)
    }

    /// Apply variables found through `lookup` over the current values
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        self.validate = parse_var(&lookup, ENV_VALIDATE, self.validate);

        let initial = &mut self.initial;
        initial.chunk_size = parse_var(&lookup, ENV_CHUNK_SIZE, initial.chunk_size);
        initial.overlap_size = parse_var(&lookup, ENV_OVERLAP_SIZE, initial.overlap_size);
        initial.top_k = parse_var(&lookup, ENV_TOP_K, initial.top_k);
        if let Some(model) = lookup(ENV_EMBEDDING_MODEL) {
            initial.embedding_model = model;
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = SettingsConfig::default();
        assert!(!config.validate);
        assert_eq!(config.initial, RetrievalConfiguration::default());
    }

    #[test]
    fn test_from_toml_full() {
        let config = SettingsConfig::from_toml_str(
            r#"
validate = true

[defaults]
chunk_size = 256
overlap_size = 32
embedding_model = "M3E Base"
top_k = 5

[[embedding_models]]
value = 1
label = "BGE M3"

[[embedding_models]]
value = 2
label = "M3E Base"
"#,
        )
        .unwrap();

        assert!(config.validate);
        assert_eq!(config.initial.chunk_size, 256);
        assert_eq!(config.initial.overlap_size, 32);
        assert_eq!(config.initial.embedding_model, "M3E Base");
        assert_eq!(config.initial.top_k, 5);
        assert_eq!(config.initial.embedding_models.len(), 2);
        assert_eq!(config.initial.selected_model().map(|m| m.value), Some(2));
    }

    #[test]
    fn test_from_toml_partial_keeps_defaults() {
        let config = SettingsConfig::from_toml_str("[defaults]\ntop_k = 8\n").unwrap();
        assert!(!config.validate);
        assert_eq!(config.initial.top_k, 8);
        assert_eq!(config.initial.chunk_size, 100);
        assert_eq!(config.initial.embedding_model, "BGE M3");
    }

    #[test]
    fn test_from_toml_empty() {
        let config = SettingsConfig::from_toml_str("").unwrap();
        assert_eq!(config, SettingsConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_unknown_key() {
        let result = SettingsConfig::from_toml_str("[defaults]\nchunk = 10\n");
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_overrides() {
        let config = SettingsConfig::default().with_overrides(env(&[
            (ENV_CHUNK_SIZE, "512"),
            (ENV_TOP_K, " 10 "),
            (ENV_EMBEDDING_MODEL, "Other"),
            (ENV_VALIDATE, "true"),
        ]));
        assert!(config.validate);
        assert_eq!(config.initial.chunk_size, 512);
        assert_eq!(config.initial.overlap_size, 20);
        assert_eq!(config.initial.top_k, 10);
        assert_eq!(config.initial.embedding_model, "Other");
    }

    #[test]
    fn test_invalid_override_falls_back() {
        let config = SettingsConfig::default()
            .with_overrides(env(&[(ENV_CHUNK_SIZE, "big"), (ENV_VALIDATE, "yes")]));
        assert!(!config.validate);
        assert_eq!(config.initial.chunk_size, 100);
    }

    #[test]
    fn test_load_validates_when_enabled() {
        let result = SettingsConfig::load(
            None,
            env(&[(ENV_VALIDATE, "true"), (ENV_OVERLAP_SIZE, "150")]),
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));

        let config =
            SettingsConfig::load(None, env(&[(ENV_OVERLAP_SIZE, "150")])).unwrap();
        assert_eq!(config.initial.overlap_size, 150);
    }

    #[test]
    fn test_load_file_then_env() {
        let path = std::env::temp_dir().join(format!(
            "rag-settings-test-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, "[defaults]\nchunk_size = 300\ntop_k = 4\n").unwrap();

        let config = SettingsConfig::load(Some(&path), env(&[(ENV_TOP_K, "6")])).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.initial.chunk_size, 300);
        assert_eq!(config.initial.top_k, 6);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join("rag-settings-does-not-exist.toml");
        let result = SettingsConfig::load(Some(&path), env(&[]));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
