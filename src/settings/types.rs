// Settings types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::SettingsError;

pub const DEFAULT_CHUNK_SIZE: i64 = 100;
pub const DEFAULT_OVERLAP_SIZE: i64 = 20;
pub const DEFAULT_EMBEDDING_MODEL: &str = "BGE M3";
pub const DEFAULT_TOP_K: i64 = 3;

/// One selectable entry of the embedding model catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingModelOption {
    /// Numeric identifier
    pub value: u32,
    /// Display label, matched against `RetrievalConfiguration::embedding_model`
    pub label: String,
}

impl EmbeddingModelOption {
    pub fn new(value: u32, label: impl Into<String>) -> Self {
        Self {
            value,
            label: label.into(),
        }
    }
}

/// Built-in model catalog
pub fn default_embedding_models() -> Vec<EmbeddingModelOption> {
    vec![EmbeddingModelOption::new(1, DEFAULT_EMBEDDING_MODEL)]
}

/// Chunking and retrieval settings for one application session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfiguration {
    /// Size of a text chunk for splitting
    pub chunk_size: i64,
    /// Overlap between consecutive chunks
    pub overlap_size: i64,
    /// Label of the active embedding model
    pub embedding_model: String,
    /// Number of retrieval results requested
    pub top_k: i64,
    /// Catalog of selectable models, fixed at construction
    pub embedding_models: Vec<EmbeddingModelOption>,
}

impl Default for RetrievalConfiguration {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap_size: DEFAULT_OVERLAP_SIZE,
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
            embedding_models: default_embedding_models(),
        }
    }
}

impl RetrievalConfiguration {
    /// Current value of a single setting
    pub fn value(&self, key: SettingKey) -> SettingValue {
        match key {
            SettingKey::ChunkSize => SettingValue::Integer(self.chunk_size),
            SettingKey::OverlapSize => SettingValue::Integer(self.overlap_size),
            SettingKey::EmbeddingModel => SettingValue::Text(self.embedding_model.clone()),
            SettingKey::TopK => SettingValue::Integer(self.top_k),
        }
    }

    /// Catalog entry matching the active model label
    pub fn selected_model(&self) -> Option<&EmbeddingModelOption> {
        self.embedding_models
            .iter()
            .find(|m| m.label == self.embedding_model)
    }
}

/// Names of the mutable settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    ChunkSize,
    OverlapSize,
    EmbeddingModel,
    TopK,
}

impl SettingKey {
    pub const ALL: [SettingKey; 4] = [
        SettingKey::ChunkSize,
        SettingKey::OverlapSize,
        SettingKey::EmbeddingModel,
        SettingKey::TopK,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ChunkSize => "chunk_size",
            SettingKey::OverlapSize => "overlap_size",
            SettingKey::EmbeddingModel => "embedding_model",
            SettingKey::TopK => "top_k",
        }
    }

    /// Whether the setting holds an integer
    pub fn is_integer(&self) -> bool {
        !matches!(self, SettingKey::EmbeddingModel)
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingKey {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "chunk_size" | "chunkSize" => Ok(SettingKey::ChunkSize),
            "overlap_size" | "overlapSize" => Ok(SettingKey::OverlapSize),
            "embedding_model" | "embeddingModel" => Ok(SettingKey::EmbeddingModel),
            "top_k" | "topK" => Ok(SettingKey::TopK),
            _ => Err(SettingsError::UnknownKey(s.to_string())),
        }
    }
}

/// Value held by a setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Integer(n) => write!(f, "{}", n),
            SettingValue::Text(s) => write!(f, "{}", s),
        }
    }
}

/// Outcome of a single write
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingChange {
    pub key: SettingKey,
    pub previous: SettingValue,
    pub current: SettingValue,
}

impl SettingChange {
    /// True when the write left the record as it was
    pub fn is_noop(&self) -> bool {
        self.previous == self.current
    }
}

impl fmt::Display for SettingChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.key, self.previous, self.current)
    }
}
