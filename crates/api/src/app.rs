use std::time::Duration;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    http::{
        header::{HeaderValue, CONTENT_TYPE},
        Method, StatusCode,
    },
    response::{Html, IntoResponse},
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::error::AppError;
use crate::gql::BudgetSchema;
use crate::state::AppState;

/// Build the Axum router with health endpoint and GraphQL
pub fn build_router(state: AppState, schema: BudgetSchema) -> Router {
    let cors = {
        let origins: Vec<HeaderValue> = state
            .config()
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE])
    };

    Router::new()
        // Liveness check; also proves store connectivity.
        .route("/health", get(health))
        .route(
            "/graphql",
            get(graphiql).post(move |req| graphql_handler(req, schema)),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(cors)
}

async fn graphql_handler(req: GraphQLRequest, schema: BudgetSchema) -> GraphQLResponse {
    schema.execute(req.into_inner()).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn health(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.store.ping().await?;
    Ok("ok")
}
