// Action layer - forwards writes to the store and runs post-write hooks

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex};
use tracing::info;

use super::error::Result;
use super::store::SettingsStore;
use super::types::{RetrievalConfiguration, SettingChange, SettingKey, SettingValue};

/// Side effect run after every effective write
#[async_trait]
pub trait SettingsHook: Send + Sync {
    async fn after_write(&self, change: &SettingChange);
}

/// Logs each change at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingHook;

#[async_trait]
impl SettingsHook for TracingHook {
    async fn after_write(&self, change: &SettingChange) {
        info!(
            key = %change.key,
            previous = %change.previous,
            current = %change.current,
            "setting changed"
        );
    }
}

/// Shared handle to a store; clones write to the same record
#[derive(Clone)]
pub struct SettingsActions {
    store: Arc<Mutex<SettingsStore>>,
    hooks: Vec<Arc<dyn SettingsHook>>,
}

impl SettingsActions {
    pub fn new(store: SettingsStore) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            hooks: Vec::new(),
        }
    }

    /// Register a hook; it only sees writes made through this handle and its clones
    pub fn with_hook(mut self, hook: Arc<dyn SettingsHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn store(&self) -> Arc<Mutex<SettingsStore>> {
        Arc::clone(&self.store)
    }

    pub async fn update_chunk_size(&self, size: i64) -> Result<SettingChange> {
        let change = self.store.lock().await.set_chunk_size(size)?;
        self.after_write(&change).await;
        Ok(change)
    }

    pub async fn update_overlap_size(&self, size: i64) -> Result<SettingChange> {
        let change = self.store.lock().await.set_overlap_size(size)?;
        self.after_write(&change).await;
        Ok(change)
    }

    pub async fn update_embedding_model(&self, model: impl Into<String>) -> Result<SettingChange> {
        let change = self.store.lock().await.set_embedding_model(model)?;
        self.after_write(&change).await;
        Ok(change)
    }

    pub async fn update_top_k(&self, k: i64) -> Result<SettingChange> {
        let change = self.store.lock().await.set_top_k(k)?;
        self.after_write(&change).await;
        Ok(change)
    }

    /// Keyed write from raw text
    pub async fn update(&self, key: SettingKey, raw: &str) -> Result<SettingChange> {
        let change = self.store.lock().await.set(key, raw)?;
        self.after_write(&change).await;
        Ok(change)
    }

    pub async fn get(&self, key: SettingKey) -> SettingValue {
        self.store.lock().await.get(key)
    }

    /// Consistent copy of the record, taken under the store lock
    pub async fn snapshot(&self) -> RetrievalConfiguration {
        self.store.lock().await.snapshot()
    }

    pub async fn subscribe(&self) -> watch::Receiver<RetrievalConfiguration> {
        self.store.lock().await.subscribe()
    }

    async fn after_write(&self, change: &SettingChange) {
        if change.is_noop() {
            return;
        }
        for hook in &self.hooks {
            hook.after_write(change).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{SettingsConfig, SettingsError};
    use std::sync::RwLock;

    /// Hook that records every change it sees
    #[derive(Default)]
    struct RecordingHook {
        changes: RwLock<Vec<SettingChange>>,
    }

    #[async_trait]
    impl SettingsHook for RecordingHook {
        async fn after_write(&self, change: &SettingChange) {
            self.changes.write().unwrap().push(change.clone());
        }
    }

    fn actions_with_recorder() -> (SettingsActions, Arc<RecordingHook>) {
        let hook = Arc::new(RecordingHook::default());
        let actions = SettingsActions::new(SettingsStore::new())
            .with_hook(hook.clone() as Arc<dyn SettingsHook>);
        (actions, hook)
    }

    #[tokio::test]
    async fn test_update_forwards_to_store() {
        let (actions, _) = actions_with_recorder();

        actions.update_chunk_size(256).await.unwrap();
        actions.update_overlap_size(32).await.unwrap();
        actions.update_embedding_model("BGE M3").await.unwrap();
        actions.update_top_k(5).await.unwrap();

        let store = actions.store();
        let store = store.lock().await;
        assert_eq!(store.chunk_size(), 256);
        assert_eq!(store.overlap_size(), 32);
        assert_eq!(store.embedding_model(), "BGE M3");
        assert_eq!(store.top_k(), 5);
    }

    #[tokio::test]
    async fn test_hooks_skip_noop_writes() {
        let (actions, hook) = actions_with_recorder();

        actions.update_top_k(3).await.unwrap();
        actions.update_top_k(7).await.unwrap();
        actions.update_top_k(7).await.unwrap();

        let changes = hook.changes.read().unwrap();
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].current, SettingValue::Integer(7));
    }

    #[tokio::test]
    async fn test_hooks_skip_rejected_writes() {
        let hook = Arc::new(RecordingHook::default());
        let store = SettingsStore::from_config(&SettingsConfig {
            validate: true,
            ..Default::default()
        })
        .unwrap();
        let actions = SettingsActions::new(store).with_hook(hook.clone() as Arc<dyn SettingsHook>);

        let result = actions.update_embedding_model("unknown").await;
        assert!(matches!(result, Err(SettingsError::UnknownModel { .. })));
        assert!(hook.changes.read().unwrap().is_empty());
        assert_eq!(actions.snapshot().await.embedding_model, "BGE M3");
    }

    #[tokio::test]
    async fn test_clones_share_store() {
        let (actions, hook) = actions_with_recorder();
        let other = actions.clone();

        other.update(SettingKey::OverlapSize, "10").await.unwrap();

        assert_eq!(
            actions.get(SettingKey::OverlapSize).await,
            SettingValue::Integer(10)
        );
        assert_eq!(hook.changes.read().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_tracing_hook_runs() {
        let actions = SettingsActions::new(SettingsStore::new()).with_hook(Arc::new(TracingHook));
        let change = actions.update_chunk_size(128).await.unwrap();
        assert_eq!(change.previous, SettingValue::Integer(100));
    }
}
