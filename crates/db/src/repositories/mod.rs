use async_trait::async_trait;
use thiserror::Error;

use rolodex_core::domain::customer::{CustomerId, CustomerRecord};

pub mod customer;
pub mod memory;

pub use customer::SqlCustomerRepository;
pub use memory::InMemoryCustomerRepository;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("decode error: {0}")]
    Decode(String),
}

/// Identifier-keyed CRUD access to stored customer records. `save` inserts
/// when the record carries no identifier and fully replaces the row
/// otherwise; either way the returned record carries the definite
/// identifier.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<CustomerRecord>, RepositoryError>;

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError>;

    async fn save(&self, record: CustomerRecord) -> Result<CustomerRecord, RepositoryError>;

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError>;
}
