use std::sync::Arc;

use api::gql::{build_schema, BudgetSchema};
use api::{AppConfig, AppState};
use async_graphql::{Request, Variables};
use infra::memory::MemoryGroupStore;
use infra::Persistence;
use uuid::Uuid;

/// Shared state backed by an in-memory store. The store is returned too so
/// tests can manipulate records outside the API.
pub fn setup_test_state() -> (AppState, Arc<MemoryGroupStore>) {
    setup_test_state_with(AppConfig::default())
}

#[allow(dead_code)]
pub fn setup_test_state_with(config: AppConfig) -> (AppState, Arc<MemoryGroupStore>) {
    let memory = Arc::new(MemoryGroupStore::new());
    let store = Arc::new(Persistence::connected(memory.clone()));
    (AppState::new(store, config), memory)
}

#[allow(dead_code)]
pub fn setup_test_schema() -> (BudgetSchema, AppState, Arc<MemoryGroupStore>) {
    let (state, memory) = setup_test_state();
    (build_schema(state.clone()), state, memory)
}

/// Helper function to execute GraphQL queries and mutations
#[allow(dead_code)]
pub async fn execute_graphql(
    schema: &BudgetSchema,
    query: &str,
    variables: Option<Variables>,
) -> async_graphql::Response {
    let mut request = Request::new(query);

    if let Some(vars) = variables {
        request = request.variables(vars);
    }

    schema.execute(request).await
}

/// Create a group through the mutation and return its id
#[allow(dead_code)]
pub async fn create_test_group(schema: &BudgetSchema, name: &str) -> Uuid {
    let response = execute_graphql(
        schema,
        r#"
            mutation CreateGroup($name: String!) {
                createGroup(groupName: $name) { id }
            }
        "#,
        Some(Variables::from_json(serde_json::json!({ "name": name }))),
    )
    .await;

    assert!(
        response.errors.is_empty(),
        "createGroup should succeed: {:?}",
        response.errors
    );

    let data = response.data.into_json().unwrap();
    Uuid::parse_str(data["createGroup"]["id"].as_str().unwrap()).unwrap()
}

/// `extensions.code` of the first error, if any
#[allow(dead_code)]
pub fn first_error_code(response: &async_graphql::Response) -> Option<String> {
    let error = response.errors.first()?;
    let json = serde_json::to_value(error).ok()?;
    json["extensions"]["code"].as_str().map(str::to_string)
}
