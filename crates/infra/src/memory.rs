//! In-process group store.
//!
//! Suitable for development and tests. Records live only as long as the
//! process and are not shared between replicas.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::models::{BudgetGroupRow, NewBudgetGroup};
use crate::store::GroupStore;

pub struct MemoryGroupStore {
    // Insertion order doubles as store order.
    groups: RwLock<Vec<BudgetGroupRow>>,
    available: AtomicBool,
}

impl Default for MemoryGroupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryGroupStore {
    pub fn new() -> Self {
        Self {
            groups: RwLock::new(Vec::new()),
            available: AtomicBool::new(true),
        }
    }

    /// Toggle simulated outages. While unavailable every call fails with
    /// [`StoreError::Operation`].
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check_available(&self) -> StoreResult<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Operation("memory store unavailable".into()))
        }
    }

    /// Append a reference from `parent` to `child`. Neither acyclicity nor the
    /// existence of `child` is checked.
    pub fn link_subgroup(&self, parent: Uuid, child: Uuid) -> StoreResult<()> {
        let mut groups = self.groups.write();
        let group = groups
            .iter_mut()
            .find(|g| g.id == parent)
            .ok_or(StoreError::NotFound)?;
        group.subgroups.push(child);
        Ok(())
    }

    pub fn rename_group(&self, id: Uuid, name: impl Into<String>) -> StoreResult<()> {
        let mut groups = self.groups.write();
        let group = groups
            .iter_mut()
            .find(|g| g.id == id)
            .ok_or(StoreError::NotFound)?;
        group.name = name.into();
        Ok(())
    }
}

#[async_trait]
impl GroupStore for MemoryGroupStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check_available()
    }

    async fn list_groups(&self) -> StoreResult<Vec<BudgetGroupRow>> {
        self.check_available()?;
        Ok(self.groups.read().clone())
    }

    async fn insert_group(&self, group: NewBudgetGroup) -> StoreResult<BudgetGroupRow> {
        self.check_available()?;
        let row = group.into_row();
        self.groups.write().push(row.clone());
        Ok(row)
    }

    async fn groups_by_ids(&self, ids: &[Uuid]) -> StoreResult<HashMap<Uuid, BudgetGroupRow>> {
        self.check_available()?;
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(self
            .groups
            .read()
            .iter()
            .filter(|g| wanted.contains(&g.id))
            .map(|g| (g.id, g.clone()))
            .collect())
    }
}
