// SettingsStore - owns the retrieval configuration record

use tokio::sync::watch;
use tracing::debug;

use super::config::SettingsConfig;
use super::error::{Result, SettingsError};
use super::types::{
    EmbeddingModelOption, RetrievalConfiguration, SettingChange, SettingKey, SettingValue,
};
use super::validation;

/// In-memory settings record with controlled writes
///
/// Setters take `&mut self`, so a store has exactly one writer at a time.
/// Share it across tasks through [`super::SettingsActions`].
#[derive(Debug)]
pub struct SettingsStore {
    record: RetrievalConfiguration,
    validate: bool,
    notify: watch::Sender<RetrievalConfiguration>,
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsStore {
    /// Store with built-in defaults and no validation
    pub fn new() -> Self {
        Self::with_record(RetrievalConfiguration::default(), false)
    }

    /// Store initialised from configuration
    pub fn from_config(config: &SettingsConfig) -> Result<Self> {
        if config.validate {
            validation::validate_configuration(&config.initial)?;
        }
        Ok(Self::with_record(config.initial.clone(), config.validate))
    }

    fn with_record(record: RetrievalConfiguration, validate: bool) -> Self {
        let (notify, _) = watch::channel(record.clone());
        Self {
            record,
            validate,
            notify,
        }
    }

    pub fn is_validating(&self) -> bool {
        self.validate
    }

    // =====================
    // Setters
    // =====================

    pub fn set_chunk_size(&mut self, size: i64) -> Result<SettingChange> {
        if self.validate {
            validation::validate_chunk_size(size, self.record.overlap_size)?;
        }
        let previous = std::mem::replace(&mut self.record.chunk_size, size);
        Ok(self.commit(
            SettingKey::ChunkSize,
            SettingValue::Integer(previous),
            SettingValue::Integer(size),
        ))
    }

    pub fn set_overlap_size(&mut self, size: i64) -> Result<SettingChange> {
        if self.validate {
            validation::validate_overlap_size(size, self.record.chunk_size)?;
        }
        let previous = std::mem::replace(&mut self.record.overlap_size, size);
        Ok(self.commit(
            SettingKey::OverlapSize,
            SettingValue::Integer(previous),
            SettingValue::Integer(size),
        ))
    }

    pub fn set_embedding_model(&mut self, model: impl Into<String>) -> Result<SettingChange> {
        let model = model.into();
        if self.validate {
            validation::validate_embedding_model(&model, &self.record.embedding_models)?;
        }
        let previous = std::mem::replace(&mut self.record.embedding_model, model.clone());
        Ok(self.commit(
            SettingKey::EmbeddingModel,
            SettingValue::Text(previous),
            SettingValue::Text(model),
        ))
    }

    pub fn set_top_k(&mut self, k: i64) -> Result<SettingChange> {
        if self.validate {
            validation::validate_top_k(k)?;
        }
        let previous = std::mem::replace(&mut self.record.top_k, k);
        Ok(self.commit(
            SettingKey::TopK,
            SettingValue::Integer(previous),
            SettingValue::Integer(k),
        ))
    }

    /// Keyed write from raw text; integer keys parse `raw` as `i64`
    pub fn set(&mut self, key: SettingKey, raw: &str) -> Result<SettingChange> {
        let integer = || {
            raw.trim()
                .parse::<i64>()
                .map_err(|_| SettingsError::InvalidValue {
                    key,
                    value: raw.to_string(),
                })
        };

        match key {
            SettingKey::ChunkSize => self.set_chunk_size(integer()?),
            SettingKey::OverlapSize => self.set_overlap_size(integer()?),
            SettingKey::TopK => self.set_top_k(integer()?),
            SettingKey::EmbeddingModel => self.set_embedding_model(raw),
        }
    }

    /// Record the write and wake observers if the record changed
    fn commit(
        &self,
        key: SettingKey,
        previous: SettingValue,
        current: SettingValue,
    ) -> SettingChange {
        let change = SettingChange {
            key,
            previous,
            current,
        };

        if change.is_noop() {
            debug!(key = %key, value = %change.current, "setting unchanged");
        } else {
            debug!(
                key = %key,
                previous = %change.previous,
                current = %change.current,
                "setting updated"
            );
            self.notify.send_replace(self.record.clone());
        }

        change
    }

    // =====================
    // Getters
    // =====================

    pub fn chunk_size(&self) -> i64 {
        self.record.chunk_size
    }

    pub fn overlap_size(&self) -> i64 {
        self.record.overlap_size
    }

    pub fn embedding_model(&self) -> &str {
        &self.record.embedding_model
    }

    pub fn embedding_models(&self) -> &[EmbeddingModelOption] {
        &self.record.embedding_models
    }

    pub fn top_k(&self) -> i64 {
        self.record.top_k
    }

    /// Current value of a single setting
    pub fn get(&self, key: SettingKey) -> SettingValue {
        self.record.value(key)
    }

    /// Catalog entry for the active model, if the label is in the catalog
    pub fn selected_model(&self) -> Option<&EmbeddingModelOption> {
        self.record.selected_model()
    }

    /// Owned copy of the whole record
    pub fn snapshot(&self) -> RetrievalConfiguration {
        self.record.clone()
    }

    /// Observe record changes; no-op writes are not published
    pub fn subscribe(&self) -> watch::Receiver<RetrievalConfiguration> {
        self.notify.subscribe()
    }
}
