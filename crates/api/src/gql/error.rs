use std::sync::Arc;

use async_graphql::ErrorExtensions;
use infra::StoreError;

/// Closed set of failures a client can see.
///
/// Every variant carries a stable `extensions.code`. Store details are logged
/// server-side; clients only get a sanitized message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GqlError {
    NotConnected,
    StoreOperationFailed(String),
    InvalidArgument(String),
    NestingTooDeep { max_depth: usize },
}

impl GqlError {
    pub fn code(&self) -> &'static str {
        match self {
            GqlError::NotConnected => "NOT_CONNECTED",
            GqlError::StoreOperationFailed(_) => "STORE_OPERATION_FAILED",
            GqlError::InvalidArgument(_) => "INVALID_ARGUMENT",
            GqlError::NestingTooDeep { .. } => "NESTING_TOO_DEEP",
        }
    }
}

impl std::fmt::Display for GqlError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GqlError::NotConnected => write!(f, "Store is not connected"),
            GqlError::StoreOperationFailed(_) => write!(f, "Store operation failed"),
            GqlError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            GqlError::NestingTooDeep { max_depth } => {
                write!(f, "Subgroups nested deeper than {max_depth} levels")
            }
        }
    }
}

impl std::error::Error for GqlError {}

impl ErrorExtensions for GqlError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", self.code()))
    }
}

impl From<&StoreError> for GqlError {
    fn from(e: &StoreError) -> Self {
        match e {
            StoreError::NotConnected => GqlError::NotConnected,
            other => GqlError::StoreOperationFailed(other.to_string()),
        }
    }
}

impl From<StoreError> for GqlError {
    fn from(e: StoreError) -> Self {
        GqlError::from(&e)
    }
}

// DataLoader shares one error between every waiting key.
impl From<Arc<StoreError>> for GqlError {
    fn from(e: Arc<StoreError>) -> Self {
        GqlError::from(e.as_ref())
    }
}

/// Log a store failure with its context and turn it into a coded GraphQL error.
///
/// Usage: `state.store.list_groups().await.or_gql("Error fetching groups")?`
pub trait ResultExt<T> {
    fn or_gql(self, context: &str) -> std::result::Result<T, async_graphql::Error>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<GqlError> + std::fmt::Display,
{
    fn or_gql(self, context: &str) -> std::result::Result<T, async_graphql::Error> {
        self.map_err(|e| {
            tracing::error!("{context}: {e}");
            let err: GqlError = e.into();
            err.extend()
        })
    }
}
