use async_graphql::MergedObject;

use crate::gql::domains::budget_groups::BudgetGroupMutation;

#[derive(MergedObject, Default)]
pub struct MutationRoot(BudgetGroupMutation);
