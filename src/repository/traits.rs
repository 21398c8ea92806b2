//! Storage seams used by the rental services.
//!
//! Services only see these traits, so Postgres can be swapped for in-memory
//! fakes or mocks without touching business logic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{Book, Customer, Rental, RentalDetails},
};

/// Read access to the book catalog
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookLookup: Send + Sync {
    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>>;
}

/// Read access to customer accounts
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerLookup: Send + Sync {
    async fn find_customer(&self, id: Uuid) -> AppResult<Option<Customer>>;

    async fn list_customers(&self) -> AppResult<Vec<Customer>>;
}

/// Active rentals plus the archive of returned ones
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RentalStore: Send + Sync {
    async fn insert(&self, rental: &Rental) -> AppResult<()>;

    async fn find(&self, id: Uuid) -> AppResult<Option<Rental>>;

    async fn find_details(&self, id: Uuid) -> AppResult<Option<RentalDetails>>;

    /// All active rentals ordered by start date
    async fn list_details(&self) -> AppResult<Vec<RentalDetails>>;

    async fn update(&self, rental: &Rental) -> AppResult<()>;

    /// Returns `false` when no rental has this id
    async fn delete(&self, id: Uuid) -> AppResult<bool>;

    /// Remove an active rental and archive its final state in one commit.
    /// Fails with `NotFound` if the rental is no longer active.
    async fn close(&self, rental: &Rental, returned_at: DateTime<Utc>) -> AppResult<()>;

    /// Returned rentals ordered by return time
    async fn list_returned(&self) -> AppResult<Vec<RentalDetails>>;
}
