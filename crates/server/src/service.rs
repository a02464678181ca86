//! Customer operations shared by every transport.
//!
//! The service speaks [`Customer`] at its boundary and maps to
//! [`CustomerRecord`](rolodex_core::CustomerRecord) before touching the
//! repository, so storage types never leak into handlers.

use rolodex_core::{to_customer, to_record, Customer, CustomerId};
use rolodex_db::repositories::{CustomerRepository, RepositoryError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("customer `{0}` not found")]
    NotFound(CustomerId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[derive(Clone)]
pub struct CustomerService {
    repository: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Customer>, ServiceError> {
        let records = self.repository.find_all().await?;
        Ok(records.into_iter().map(to_customer).collect())
    }

    pub async fn get_by_id(&self, id: CustomerId) -> Result<Customer, ServiceError> {
        let record = self.repository.find_by_id(id).await?.ok_or(ServiceError::NotFound(id))?;
        Ok(to_customer(record))
    }

    pub async fn create(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let saved = self.repository.save(to_record(customer)).await?;
        Ok(to_customer(saved))
    }

    /// Replaces a customer record.
    ///
    /// The identifier argument only gates existence. The record that gets
    /// written is the caller-supplied one: a body carrying a different
    /// identifier replaces that row instead, and a body without one inserts
    /// a fresh record.
    pub async fn update(&self, id: CustomerId, customer: Customer) -> Result<Customer, ServiceError> {
        self.repository.find_by_id(id).await?.ok_or(ServiceError::NotFound(id))?;
        let saved = self.repository.save(to_record(customer)).await?;
        Ok(to_customer(saved))
    }

    pub async fn delete(&self, id: CustomerId) -> Result<(), ServiceError> {
        self.repository.find_by_id(id).await?.ok_or(ServiceError::NotFound(id))?;
        self.repository.delete_by_id(id).await?;
        Ok(())
    }
}
