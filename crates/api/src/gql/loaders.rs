use async_graphql::dataloader::Loader;
use infra::{models::BudgetGroupRow, Persistence, StoreError};
use std::{collections::HashMap, future::Future, sync::Arc};
use uuid::Uuid;

/// Batch-resolves subgroup references by id.
///
/// Built without a cache, so every request reads the current record behind a
/// reference rather than a copy taken earlier.
#[derive(Clone)]
pub struct BudgetGroupLoader {
    store: Arc<Persistence>,
}

impl BudgetGroupLoader {
    pub fn new(store: Arc<Persistence>) -> Self {
        Self { store }
    }
}

impl Loader<Uuid> for BudgetGroupLoader {
    type Value = BudgetGroupRow;
    type Error = Arc<StoreError>;

    fn load(
        &self,
        keys: &[Uuid],
    ) -> impl Future<Output = std::result::Result<HashMap<Uuid, Self::Value>, Self::Error>> + Send
    {
        let store = self.store.clone();
        let ids: Vec<Uuid> = keys.to_vec();

        async move { store.groups_by_ids(&ids).await.map_err(Arc::new) }
    }
}
