pub mod db;
pub mod error;
pub mod memory;
pub mod models;
pub mod repos;
pub mod snapshot;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use store::{ConnectionStatus, GroupStore, Persistence};
