//! Store abstraction and the process-wide persistence handle.
//!
//! Backends ([`crate::repos::BudgetGroupRepo`] for Postgres,
//! [`crate::memory::MemoryGroupStore`] in-process) implement [`GroupStore`].
//! Resolvers never see a backend directly: they go through [`Persistence`],
//! which owns the connection state.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::db::{self, StoreBackend, StoreConfig};
use crate::error::{StoreError, StoreResult};
use crate::memory::MemoryGroupStore;
use crate::models::{BudgetGroupRow, NewBudgetGroup};
use crate::repos::BudgetGroupRepo;

#[async_trait]
pub trait GroupStore: Send + Sync {
    /// Short label used in logs.
    fn backend_name(&self) -> &'static str;

    async fn ping(&self) -> StoreResult<()>;

    /// Every budget group, in store order. No filter, no pagination.
    async fn list_groups(&self) -> StoreResult<Vec<BudgetGroupRow>>;

    /// Persist a new group and return it with its assigned id.
    async fn insert_group(&self, group: NewBudgetGroup) -> StoreResult<BudgetGroupRow>;

    /// Resolve reference links. Ids with no record are absent from the map.
    async fn groups_by_ids(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, BudgetGroupRow>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionStatus {
    Disconnected,
    Connected,
}

/// Single store session shared by every request.
///
/// Starts `Disconnected`; [`Persistence::attach`] moves it to `Connected`.
/// Any operation while disconnected fails with [`StoreError::NotConnected`].
pub struct Persistence {
    backend: RwLock<Option<Arc<dyn GroupStore>>>,
}

impl Default for Persistence {
    fn default() -> Self {
        Self::disconnected()
    }
}

impl Persistence {
    pub fn disconnected() -> Self {
        Self {
            backend: RwLock::new(None),
        }
    }

    pub fn connected(store: Arc<dyn GroupStore>) -> Self {
        let persistence = Self::disconnected();
        persistence.attach(store);
        persistence
    }

    /// Open the configured backend. Failure is reported once and returned.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let store: Arc<dyn GroupStore> = match &config.backend {
            StoreBackend::Memory => Arc::new(MemoryGroupStore::new()),
            StoreBackend::Postgres(pg) => match db::connect(pg).await {
                Ok(pool) => Arc::new(BudgetGroupRepo::new(pool)),
                Err(e) => {
                    tracing::error!("Failed to connect to store: {e}");
                    return Err(e);
                }
            },
        };

        Ok(Self::connected(store))
    }

    pub fn attach(&self, store: Arc<dyn GroupStore>) {
        tracing::info!(backend = store.backend_name(), "Connected to store");
        *self.backend.write() = Some(store);
    }

    pub fn disconnect(&self) {
        if let Some(store) = self.backend.write().take() {
            tracing::info!(backend = store.backend_name(), "Disconnected from store");
        }
    }

    pub fn status(&self) -> ConnectionStatus {
        if self.backend.read().is_some() {
            ConnectionStatus::Connected
        } else {
            ConnectionStatus::Disconnected
        }
    }

    fn backend(&self) -> StoreResult<Arc<dyn GroupStore>> {
        self.backend.read().clone().ok_or(StoreError::NotConnected)
    }

    pub async fn ping(&self) -> StoreResult<()> {
        self.backend()?.ping().await
    }

    pub async fn list_groups(&self) -> StoreResult<Vec<BudgetGroupRow>> {
        self.backend()?.list_groups().await
    }

    pub async fn insert_group(&self, group: NewBudgetGroup) -> StoreResult<BudgetGroupRow> {
        self.backend()?.insert_group(group).await
    }

    pub async fn groups_by_ids(
        &self,
        ids: &[Uuid],
    ) -> StoreResult<HashMap<Uuid, BudgetGroupRow>> {
        let backend = self.backend()?;
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        backend.groups_by_ids(ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn operations_fail_while_disconnected() {
        let persistence = Persistence::disconnected();

        assert_eq!(persistence.status(), ConnectionStatus::Disconnected);
        assert!(matches!(
            persistence.list_groups().await,
            Err(StoreError::NotConnected)
        ));
        assert!(matches!(
            persistence.insert_group(NewBudgetGroup::new("Food")).await,
            Err(StoreError::NotConnected)
        ));
        assert!(matches!(
            persistence.groups_by_ids(&[]).await,
            Err(StoreError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn connect_with_memory_backend() {
        let config = StoreConfig {
            backend: StoreBackend::Memory,
        };
        let persistence = Persistence::connect(&config).await.unwrap();

        assert_eq!(persistence.status(), ConnectionStatus::Connected);
        assert!(persistence.list_groups().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn disconnect_returns_to_initial_state() {
        let persistence = Persistence::connected(Arc::new(MemoryGroupStore::new()));
        persistence.insert_group(NewBudgetGroup::new("Food")).await.unwrap();

        persistence.disconnect();

        assert_eq!(persistence.status(), ConnectionStatus::Disconnected);
        assert!(matches!(persistence.ping().await, Err(StoreError::NotConnected)));
    }
}
