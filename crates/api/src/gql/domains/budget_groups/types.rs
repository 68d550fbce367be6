use std::sync::Arc;

use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, ErrorExtensions, Result, SimpleObject, ID};
use uuid::Uuid;

use crate::gql::error::{GqlError, ResultExt};
use crate::gql::loaders::BudgetGroupLoader;
use crate::state::AppState;
use infra::models::BudgetGroupRow;

/// A named node in the budget hierarchy. Subgroups are references, resolved
/// only when the query selects them.
#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct BudgetGroup {
    pub id: ID,
    pub name: String,
    #[graphql(skip)]
    pub subgroup_ids: Vec<Uuid>,
    /// Ids from the top-level group down to this one, inclusive.
    #[graphql(skip)]
    pub path: Arc<[Uuid]>,
}

impl From<BudgetGroupRow> for BudgetGroup {
    fn from(row: BudgetGroupRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            subgroup_ids: row.subgroups,
            path: Arc::from([row.id]),
        }
    }
}

impl BudgetGroup {
    fn child(&self, row: BudgetGroupRow) -> Self {
        let path: Arc<[Uuid]> = self.path.iter().copied().chain([row.id]).collect();
        Self {
            id: row.id.into(),
            name: row.name,
            subgroup_ids: row.subgroups,
            path,
        }
    }

    /// Levels below the top-level group (which is depth 0).
    pub fn depth(&self) -> usize {
        self.path.len() - 1
    }
}

#[ComplexObject]
impl BudgetGroup {
    /// Referenced subgroups in link order. Links back to an ancestor and links
    /// to missing records are skipped.
    async fn subgroups(&self, ctx: &Context<'_>) -> Result<Vec<BudgetGroup>> {
        let links: Vec<Uuid> = self
            .subgroup_ids
            .iter()
            .copied()
            .filter(|id| {
                let cyclic = self.path.contains(id);
                if cyclic {
                    tracing::warn!(group = %self.id.as_str(), subgroup = %id, "skipping cyclic subgroup reference");
                }
                !cyclic
            })
            .collect();
        if links.is_empty() {
            return Ok(Vec::new());
        }

        let max_depth = ctx.data::<AppState>()?.config().subgroup_max_depth;
        if self.depth() >= max_depth {
            tracing::warn!(group = %self.id.as_str(), max_depth, "subgroup nesting limit reached");
            return Err(GqlError::NestingTooDeep { max_depth }.extend());
        }

        let loader = ctx.data::<DataLoader<BudgetGroupLoader>>()?;
        let found = loader
            .load_many(links.iter().copied())
            .await
            .or_gql("Error resolving subgroups")?;

        let mut children = Vec::with_capacity(links.len());
        for id in &links {
            // A group listed twice under one parent still resolves twice.
            match found.get(id).cloned() {
                Some(row) => children.push(self.child(row)),
                None => {
                    tracing::warn!(group = %self.id.as_str(), subgroup = %id, "skipping dangling subgroup reference")
                }
            }
        }

        Ok(children)
    }
}
