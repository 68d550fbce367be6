use async_graphql::MergedObject;

use crate::gql::domains::budget_groups::BudgetGroupQuery;

#[derive(MergedObject, Default)]
pub struct QueryRoot(BudgetGroupQuery);
