use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use infra::StoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl AppError {
    /// Message sent to clients. The full error only goes to the log.
    fn public_message(&self) -> &'static str {
        match self {
            AppError::Store(StoreError::NotConnected) => "store unavailable",
            AppError::Store(_) => "store error",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::Store(StoreError::NotConnected) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        tracing::error!("{self}");
        (
            status,
            Json(ErrorBody {
                error: self.public_message().to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: AppError) -> (StatusCode, String) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn store_detail_stays_out_of_the_response() {
        let (status, body) = body_of(AppError::from(StoreError::Operation(
            "password=hunter2 host=db.internal".into(),
        )))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, r#"{"error":"store error"}"#);
    }

    #[tokio::test]
    async fn disconnected_store_is_unavailable() {
        let (status, body) = body_of(AppError::from(StoreError::NotConnected)).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body, r#"{"error":"store unavailable"}"#);
    }
}
