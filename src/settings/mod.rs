// Settings module - chunking / embedding / retrieval configuration store
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod actions;
pub mod config;
pub mod error;
pub mod store;
pub mod types;
pub mod validation;

pub use actions::{SettingsActions, SettingsHook, TracingHook};
pub use config::SettingsConfig;
pub use error::{ConfigError, Result, SettingsError};
pub use store::SettingsStore;
pub use types::{
    EmbeddingModelOption, RetrievalConfiguration, SettingChange, SettingKey, SettingValue,
};
