//! Rental model and related types

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use super::book::BookShort;
use super::customer::CustomerShort;

/// Rental model from database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub book_id: Uuid,
    pub customer_id: Uuid,
    pub rent_start_date: DateTime<Utc>,
    pub rent_end_date: DateTime<Utc>,
    pub quantity: i32,
    pub price: Decimal,
}

impl Rental {
    /// Whole days between start and end, truncated toward zero.
    /// Negative when the end date precedes the start date.
    pub fn days(&self) -> i64 {
        rental_days(self.rent_start_date, self.rent_end_date)
    }

    /// Recompute the price from the current dates and quantity
    pub fn reprice(&mut self, price_per_day: Decimal) {
        self.price = rental_price(
            price_per_day,
            self.rent_start_date,
            self.rent_end_date,
            self.quantity,
        );
    }
}

pub fn rental_days(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    (end - start).num_days()
}

/// `price_per_day × days × quantity`
pub fn rental_price(
    price_per_day: Decimal,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    quantity: i32,
) -> Decimal {
    price_per_day * Decimal::from(rental_days(start, end)) * Decimal::from(quantity)
}

/// Rental with its book and customer joined for display.
/// Either side is `None` when the referenced row no longer exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RentalDetails {
    pub rental: Rental,
    pub book: Option<BookShort>,
    pub customer: Option<CustomerShort>,
}

/// Internal row structure for joined rental queries
#[derive(Debug, Clone, FromRow)]
pub struct RentalDetailsRow {
    id: Uuid,
    book_id: Uuid,
    customer_id: Uuid,
    rent_start_date: DateTime<Utc>,
    rent_end_date: DateTime<Utc>,
    quantity: i32,
    price: Decimal,
    book_title: Option<String>,
    customer_first_name: Option<String>,
    customer_last_name: Option<String>,
    customer_email: Option<String>,
}

impl From<RentalDetailsRow> for RentalDetails {
    fn from(row: RentalDetailsRow) -> Self {
        let book = row.book_title.map(|title| BookShort {
            id: row.book_id,
            title,
        });
        let customer = row.customer_first_name.map(|first_name| CustomerShort {
            id: row.customer_id,
            first_name,
            last_name: row.customer_last_name.unwrap_or_default(),
            email: row.customer_email.unwrap_or_default(),
        });

        RentalDetails {
            rental: Rental {
                id: row.id,
                book_id: row.book_id,
                customer_id: row.customer_id,
                rent_start_date: row.rent_start_date,
                rent_end_date: row.rent_end_date,
                quantity: row.quantity,
                price: row.price,
            },
            book,
            customer,
        }
    }
}

/// Flattened rental view returned to API callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RentalDto {
    pub id: Uuid,
    pub book_id: Uuid,
    pub book_title: Option<String>,
    pub customer_id: Uuid,
    pub customer_name: Option<String>,
    pub customer_email: Option<String>,
    pub rent_start_date: DateTime<Utc>,
    pub rent_end_date: DateTime<Utc>,
    pub quantity: i32,
    pub price: Decimal,
}

impl From<RentalDetails> for RentalDto {
    fn from(details: RentalDetails) -> Self {
        let RentalDetails {
            rental,
            book,
            customer,
        } = details;

        RentalDto {
            id: rental.id,
            book_id: rental.book_id,
            book_title: book.map(|b| b.title),
            customer_id: rental.customer_id,
            customer_name: customer.as_ref().map(|c| c.display_name().to_string()),
            customer_email: customer.map(|c| c.email),
            rent_start_date: rental.rent_start_date,
            rent_end_date: rental.rent_end_date,
            quantity: rental.quantity,
            price: rental.price,
        }
    }
}

/// Rent and update request body
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct RentalRequest {
    pub book_id: Uuid,
    pub customer_id: Uuid,
    /// Requested end of the rental period (ISO 8601)
    pub rent_end_date: DateTime<Utc>,
    pub quantity: i32,
}
