use async_graphql::{Context, ErrorExtensions, Object, Result};

use super::types::BudgetGroup;
use crate::gql::common::helpers::normalize_group_name;
use crate::gql::error::ResultExt;
use crate::state::AppState;
use infra::models::NewBudgetGroup;

#[derive(Default)]
pub struct BudgetGroupQuery;

#[Object]
impl BudgetGroupQuery {
    /// Every budget group in store order.
    async fn groups(&self, ctx: &Context<'_>) -> Result<Vec<BudgetGroup>> {
        let state = ctx.data::<AppState>()?;
        let rows = state
            .store
            .list_groups()
            .await
            .or_gql("Error fetching groups")?;
        tracing::debug!(count = rows.len(), "fetched budget groups");
        Ok(rows.into_iter().map(BudgetGroup::from).collect())
    }
}

#[derive(Default)]
pub struct BudgetGroupMutation;

#[Object]
impl BudgetGroupMutation {
    /// Create a group with no subgroups. Names need not be unique.
    async fn create_group(&self, ctx: &Context<'_>, group_name: String) -> Result<BudgetGroup> {
        let state = ctx.data::<AppState>()?;
        let name = normalize_group_name(&group_name).map_err(|e| e.extend())?;

        let row = state
            .store
            .insert_group(NewBudgetGroup::new(name))
            .await
            .or_gql("Error creating group")?;
        tracing::info!(group_id = %row.id, name = %row.name, "created budget group");

        Ok(row.into())
    }
}
