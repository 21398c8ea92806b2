//! Rentals repository for database operations

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{rental::RentalDetailsRow, Rental, RentalDetails},
};

use super::traits::RentalStore;

const ACTIVE_DETAILS_SELECT: &str = r#"
    SELECT r.id, r.book_id, r.customer_id, r.rent_start_date, r.rent_end_date,
           r.quantity, r.price,
           b.title AS book_title,
           c.first_name AS customer_first_name,
           c.last_name AS customer_last_name,
           c.email AS customer_email
    FROM rentals r
    LEFT JOIN books b ON b.id = r.book_id
    LEFT JOIN customers c ON c.id = r.customer_id
"#;

#[derive(Clone)]
pub struct RentalsRepository {
    pool: Pool<Postgres>,
}

impl RentalsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RentalStore for RentalsRepository {
    async fn insert(&self, rental: &Rental) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO rentals (id, book_id, customer_id, rent_start_date, rent_end_date, quantity, price)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(rental.id)
        .bind(rental.book_id)
        .bind(rental.customer_id)
        .bind(rental.rent_start_date)
        .bind(rental.rent_end_date)
        .bind(rental.quantity)
        .bind(rental.price)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Rental>> {
        let rental = sqlx::query_as::<_, Rental>(
            r#"
            SELECT id, book_id, customer_id, rent_start_date, rent_end_date, quantity, price
            FROM rentals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(rental)
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<RentalDetails>> {
        let row = sqlx::query_as::<_, RentalDetailsRow>(&format!(
            "{} WHERE r.id = $1",
            ACTIVE_DETAILS_SELECT
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RentalDetails::from))
    }

    async fn list_details(&self) -> AppResult<Vec<RentalDetails>> {
        let rows = sqlx::query_as::<_, RentalDetailsRow>(&format!(
            "{} ORDER BY r.rent_start_date, r.id",
            ACTIVE_DETAILS_SELECT
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RentalDetails::from).collect())
    }

    async fn update(&self, rental: &Rental) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE rentals
            SET book_id = $2, customer_id = $3, rent_end_date = $4, quantity = $5, price = $6
            WHERE id = $1
            "#,
        )
        .bind(rental.id)
        .bind(rental.book_id)
        .bind(rental.customer_id)
        .bind(rental.rent_end_date)
        .bind(rental.quantity)
        .bind(rental.price)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Rental with id {} not found",
                rental.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn close(&self, rental: &Rental, returned_at: DateTime<Utc>) -> AppResult<()> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM rentals WHERE id = $1")
            .bind(rental.id)
            .execute(&mut *tx)
            .await?;

        if deleted.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(AppError::NotFound(format!(
                "Rental with id {} not found",
                rental.id
            )));
        }

        sqlx::query(
            r#"
            INSERT INTO returned_rentals (
                id, book_id, customer_id, rent_start_date, rent_end_date,
                quantity, price, returned_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(rental.id)
        .bind(rental.book_id)
        .bind(rental.customer_id)
        .bind(rental.rent_start_date)
        .bind(rental.rent_end_date)
        .bind(rental.quantity)
        .bind(rental.price)
        .bind(returned_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(())
    }

    async fn list_returned(&self) -> AppResult<Vec<RentalDetails>> {
        let rows = sqlx::query_as::<_, RentalDetailsRow>(
            r#"
            SELECT r.id, r.book_id, r.customer_id, r.rent_start_date, r.rent_end_date,
                   r.quantity, r.price,
                   b.title AS book_title,
                   c.first_name AS customer_first_name,
                   c.last_name AS customer_last_name,
                   c.email AS customer_email
            FROM returned_rentals r
            LEFT JOIN books b ON b.id = r.book_id
            LEFT JOIN customers c ON c.id = r.customer_id
            ORDER BY r.returned_at, r.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(RentalDetails::from).collect())
    }
}
