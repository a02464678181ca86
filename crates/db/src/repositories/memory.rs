use std::collections::BTreeMap;

use tokio::sync::RwLock;

use rolodex_core::domain::customer::{CustomerId, CustomerRecord};

use super::{CustomerRepository, RepositoryError};

/// Test double with the same observable semantics as
/// [`super::SqlCustomerRepository`]: monotonic identifier assignment on
/// first save, full replacement on save-with-identifier, silent delete of
/// unknown identifiers.
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    records: BTreeMap<i64, CustomerRecord>,
    next_id: i64,
}

#[async_trait::async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_all(&self) -> Result<Vec<CustomerRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.records.values().cloned().collect())
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        let state = self.state.read().await;
        Ok(state.records.get(&id.0).cloned())
    }

    async fn save(&self, record: CustomerRecord) -> Result<CustomerRecord, RepositoryError> {
        let mut state = self.state.write().await;

        let id = match record.id {
            Some(id) => id,
            None => {
                state.next_id += 1;
                CustomerId(state.next_id)
            }
        };
        if id.0 > state.next_id {
            state.next_id = id.0;
        }

        let stored = CustomerRecord { id: Some(id), ..record };
        state.records.insert(id.0, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        let mut state = self.state.write().await;
        state.records.remove(&id.0);
        Ok(())
    }
}
