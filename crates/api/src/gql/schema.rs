use async_graphql::dataloader::DataLoader;
use async_graphql::{EmptySubscription, Schema};

use super::domains::expenses::types::Expense;
use super::domains::users::types::User;
use super::loaders::BudgetGroupLoader;
use super::{MutationRoot, QueryRoot};
use crate::state::AppState;

pub type BudgetSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the GraphQL schema and inject shared state (AppState) into the context.
pub fn build_schema(state: AppState) -> BudgetSchema {
    let group_loader = DataLoader::new(BudgetGroupLoader::new(state.store.clone()), tokio::spawn);
    let config = state.config().clone();

    let mut builder = Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    // Declared in the contract but not reachable from any root field yet.
    .register_output_type::<Expense>()
    .register_output_type::<User>()
    .data(state) // AppState is Clone; available in resolvers via ctx.data::<AppState>()
    .data(group_loader)
    .limit_depth(config.max_query_depth)
    .limit_complexity(config.max_query_complexity);

    if !config.introspection {
        builder = builder.disable_introspection();
    }

    builder.finish()
}
