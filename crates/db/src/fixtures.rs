use sqlx::Executor;

use crate::connection::DbPool;
use crate::repositories::RepositoryError;

/// Deterministic demo customers loaded by `rolodex seed`.
const SEED_CUSTOMERS: &[SeedCustomerContract] = &[
    SeedCustomerContract {
        label: "customer-john",
        id: 1,
        first_name: "John",
        last_name: "Doe",
        national_security_number: "123-45-6789",
    },
    SeedCustomerContract {
        label: "customer-jane",
        id: 2,
        first_name: "Jane",
        last_name: "Doe",
        national_security_number: "987-65-4321",
    },
    SeedCustomerContract {
        label: "customer-alex",
        id: 3,
        first_name: "Alex",
        last_name: "Smith",
        national_security_number: "555-12-3456",
    },
];

pub struct SeedDataset;

impl SeedDataset {
    /// SQL fixture content. Uses `INSERT OR REPLACE` with fixed identifiers so
    /// repeated loads converge on the same rows.
    pub const SQL: &str = include_str!("../../../config/fixtures/seed_customers.sql");

    pub async fn load(pool: &DbPool) -> Result<SeedResult, RepositoryError> {
        let mut tx = pool.begin().await?;

        tx.execute(sqlx::query(Self::SQL)).await?;
        tx.commit().await?;

        let customers_seeded = SEED_CUSTOMERS
            .iter()
            .map(|customer| CustomerSeedInfo {
                id: customer.id,
                first_name: customer.first_name,
                last_name: customer.last_name,
            })
            .collect::<Vec<_>>();

        Ok(SeedResult { customers_seeded })
    }

    /// Verify that the seeded rows exist and still match the contract.
    pub async fn verify(pool: &DbPool) -> Result<VerificationResult, RepositoryError> {
        let mut checks = Vec::new();

        for customer in SEED_CUSTOMERS {
            let present: i64 = sqlx::query_scalar(
                "SELECT EXISTS(
                    SELECT 1 FROM customer
                    WHERE id = ?1
                      AND first_name = ?2
                      AND last_name = ?3
                      AND national_security_number = ?4
                 )",
            )
            .bind(customer.id)
            .bind(customer.first_name)
            .bind(customer.last_name)
            .bind(customer.national_security_number)
            .fetch_one(pool)
            .await?;
            checks.push((customer.label, present == 1));
        }

        // Seeded rows carry explicit identifiers; the autoincrement sequence
        // must sit at or above them or later creates would collide.
        let sequence: i64 = sqlx::query_scalar(
            "SELECT IFNULL(MAX(seq), 0) FROM sqlite_sequence WHERE name = 'customer'",
        )
        .fetch_one(pool)
        .await?;
        let max_seed_id = SEED_CUSTOMERS.iter().map(|customer| customer.id).max().unwrap_or(0);
        checks.push(("id-sequence", sequence >= max_seed_id));

        let all_present = checks.iter().all(|(_, exists)| *exists);
        Ok(VerificationResult { all_present, checks })
    }

    /// Remove the seeded rows from a test database.
    pub async fn clean(pool: &DbPool) -> Result<(), RepositoryError> {
        let mut tx = pool.begin().await?;

        let quoted_ids = SEED_CUSTOMERS
            .iter()
            .map(|customer| customer.id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        sqlx::query(&format!("DELETE FROM customer WHERE id IN ({quoted_ids})"))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct SeedCustomerContract {
    label: &'static str,
    id: i64,
    first_name: &'static str,
    last_name: &'static str,
    national_security_number: &'static str,
}

#[derive(Debug)]
pub struct SeedResult {
    pub customers_seeded: Vec<CustomerSeedInfo>,
}

#[derive(Debug)]
pub struct CustomerSeedInfo {
    pub id: i64,
    pub first_name: &'static str,
    pub last_name: &'static str,
}

#[derive(Debug)]
pub struct VerificationResult {
    pub all_present: bool,
    pub checks: Vec<(&'static str, bool)>,
}
