use async_graphql::dataloader::DataLoader;
use async_graphql::{ComplexObject, Context, Result, SimpleObject, ID};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::gql::domains::budget_groups::types::BudgetGroup;
use crate::gql::error::ResultExt;
use crate::gql::loaders::BudgetGroupLoader;
use infra::models::ExpenseRow;

#[derive(SimpleObject, Clone, Debug)]
#[graphql(complex)]
pub struct Expense {
    pub id: ID,
    pub name: String,
    pub value: f64,
    /// Free-text label; not a link into the group hierarchy.
    pub group: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[graphql(skip)]
    pub subgroup_id: Option<Uuid>,
}

impl From<ExpenseRow> for Expense {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id.into(),
            name: row.name,
            value: row.value,
            group: row.group,
            timestamp: row.timestamp,
            subgroup_id: row.subgroup,
        }
    }
}

#[ComplexObject]
impl Expense {
    async fn subgroup(&self, ctx: &Context<'_>) -> Result<Option<BudgetGroup>> {
        let Some(subgroup_id) = self.subgroup_id else {
            return Ok(None);
        };

        let loader = ctx.data::<DataLoader<BudgetGroupLoader>>()?;
        let row = loader
            .load_one(subgroup_id)
            .await
            .or_gql("Error resolving expense subgroup")?;

        Ok(row.map(BudgetGroup::from))
    }
}
