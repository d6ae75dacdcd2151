// Optional range and membership checks for settings

use super::error::{Result, SettingsError};
use super::types::{EmbeddingModelOption, RetrievalConfiguration, SettingKey};

/// Validate a whole record
pub fn validate_configuration(config: &RetrievalConfiguration) -> Result<()> {
    validate_chunk_size(config.chunk_size, config.overlap_size)?;
    validate_overlap_size(config.overlap_size, config.chunk_size)?;
    validate_top_k(config.top_k)?;
    validate_embedding_model(&config.embedding_model, &config.embedding_models)?;
    Ok(())
}

/// Chunk size must be positive and larger than the current overlap
pub fn validate_chunk_size(chunk_size: i64, overlap_size: i64) -> Result<()> {
    if chunk_size <= 0 {
        return Err(invalid_range(SettingKey::ChunkSize, chunk_size, "Must be >= 1"));
    }
    if overlap_size >= chunk_size {
        return Err(invalid_range(
            SettingKey::ChunkSize,
            chunk_size,
            format!("Must be > overlap_size ({})", overlap_size),
        ));
    }
    Ok(())
}

/// Overlap must be non-negative and smaller than the chunk size
pub fn validate_overlap_size(overlap_size: i64, chunk_size: i64) -> Result<()> {
    if overlap_size < 0 {
        return Err(invalid_range(
            SettingKey::OverlapSize,
            overlap_size,
            "Must be >= 0",
        ));
    }
    if overlap_size >= chunk_size {
        return Err(invalid_range(
            SettingKey::OverlapSize,
            overlap_size,
            format!("Must be < chunk_size ({})", chunk_size),
        ));
    }
    Ok(())
}

pub fn validate_top_k(top_k: i64) -> Result<()> {
    if top_k <= 0 {
        return Err(invalid_range(SettingKey::TopK, top_k, "Must be >= 1"));
    }
    Ok(())
}

/// Label must name an entry of the catalog
pub fn validate_embedding_model(label: &str, catalog: &[EmbeddingModelOption]) -> Result<()> {
    if catalog.iter().any(|m| m.label == label) {
        Ok(())
    } else {
        Err(SettingsError::UnknownModel {
            label: label.to_string(),
            known: catalog
                .iter()
                .map(|m| m.label.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }
}

fn invalid_range(key: SettingKey, value: i64, reason: impl Into<String>) -> SettingsError {
    SettingsError::InvalidRange {
        key,
        value,
        reason: reason.into(),
    }
}
