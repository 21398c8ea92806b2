//! Customers repository for database operations

use async_trait::async_trait;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{error::AppResult, models::Customer};

use super::traits::CustomerLookup;

#[derive(Clone)]
pub struct CustomersRepository {
    pool: Pool<Postgres>,
}

impl CustomersRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerLookup for CustomersRepository {
    async fn find_customer(&self, id: Uuid) -> AppResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT id, first_name, last_name, email FROM customers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, first_name, last_name, email FROM customers ORDER BY last_name, first_name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }
}
