use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use rolodex_core::domain::customer::{CustomerId, CustomerRecord};

use super::{CustomerRepository, RepositoryError};
use crate::DbPool;

pub struct SqlCustomerRepository {
    pool: DbPool,
}

impl SqlCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl CustomerRepository for SqlCustomerRepository {
    async fn find_all(&self) -> Result<Vec<CustomerRecord>, RepositoryError> {
        // Natural storage order; callers treat ordering as incidental.
        let rows = sqlx::query(
            "SELECT
                id,
                first_name,
                last_name,
                address,
                phone_number,
                date_of_birth,
                national_security_number
             FROM customer",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(row_to_record).collect()
    }

    async fn find_by_id(&self, id: CustomerId) -> Result<Option<CustomerRecord>, RepositoryError> {
        let row = sqlx::query(
            "SELECT
                id,
                first_name,
                last_name,
                address,
                phone_number,
                date_of_birth,
                national_security_number
             FROM customer
             WHERE id = ?",
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await?;

        row.map(row_to_record).transpose()
    }

    async fn save(&self, record: CustomerRecord) -> Result<CustomerRecord, RepositoryError> {
        match record.id {
            None => {
                let result = sqlx::query(
                    "INSERT INTO customer (
                        first_name,
                        last_name,
                        address,
                        phone_number,
                        date_of_birth,
                        national_security_number
                     ) VALUES (?, ?, ?, ?, ?, ?)",
                )
                .bind(&record.first_name)
                .bind(&record.last_name)
                .bind(record.address.as_deref())
                .bind(record.phone_number.as_deref())
                .bind(record.date_of_birth.map(|date| date.to_string()))
                .bind(record.national_security_number.as_deref())
                .execute(&self.pool)
                .await?;

                let assigned = CustomerId(result.last_insert_rowid());
                Ok(CustomerRecord { id: Some(assigned), ..record })
            }
            Some(id) => {
                sqlx::query(
                    "INSERT INTO customer (
                        id,
                        first_name,
                        last_name,
                        address,
                        phone_number,
                        date_of_birth,
                        national_security_number
                     ) VALUES (?, ?, ?, ?, ?, ?, ?)
                     ON CONFLICT(id) DO UPDATE SET
                        first_name = excluded.first_name,
                        last_name = excluded.last_name,
                        address = excluded.address,
                        phone_number = excluded.phone_number,
                        date_of_birth = excluded.date_of_birth,
                        national_security_number = excluded.national_security_number",
                )
                .bind(id.0)
                .bind(&record.first_name)
                .bind(&record.last_name)
                .bind(record.address.as_deref())
                .bind(record.phone_number.as_deref())
                .bind(record.date_of_birth.map(|date| date.to_string()))
                .bind(record.national_security_number.as_deref())
                .execute(&self.pool)
                .await?;

                Ok(record)
            }
        }
    }

    async fn delete_by_id(&self, id: CustomerId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM customer WHERE id = ?").bind(id.0).execute(&self.pool).await?;

        Ok(())
    }
}

fn row_to_record(row: SqliteRow) -> Result<CustomerRecord, RepositoryError> {
    Ok(CustomerRecord {
        id: Some(CustomerId(row.try_get("id")?)),
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        address: row.try_get("address")?,
        phone_number: row.try_get("phone_number")?,
        date_of_birth: parse_optional_date("date_of_birth", row.try_get("date_of_birth")?)?,
        national_security_number: row.try_get("national_security_number")?,
    })
}

fn parse_date(column: &str, value: String) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(&value, "%Y-%m-%d").map_err(|error| {
        RepositoryError::Decode(format!("invalid date in `{column}`: `{value}` ({error})"))
    })
}

fn parse_optional_date(
    column: &str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, RepositoryError> {
    value.map(|date| parse_date(column, date)).transpose()
}
