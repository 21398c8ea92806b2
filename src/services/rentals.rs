//! Rental orchestration service
//!
//! Every operation checks the caller's capability first, resolves the
//! referenced book, customer and rental, then performs at most one write.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{AuthContext, Capability, Rental, RentalDto, RentalRequest},
    repository::{BookLookup, CustomerLookup, RentalStore},
};

/// Source of the current time
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct RentalsService {
    books: Arc<dyn BookLookup>,
    customers: Arc<dyn CustomerLookup>,
    rentals: Arc<dyn RentalStore>,
    price_per_day: Decimal,
    clock: Clock,
}

impl RentalsService {
    pub fn new(
        books: Arc<dyn BookLookup>,
        customers: Arc<dyn CustomerLookup>,
        rentals: Arc<dyn RentalStore>,
        price_per_day: Decimal,
    ) -> Self {
        Self {
            books,
            customers,
            rentals,
            price_per_day,
            clock: Arc::new(Utc::now),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub fn price_per_day(&self) -> Decimal {
        self.price_per_day
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    async fn require_book(&self, id: Uuid) -> AppResult<()> {
        match self.books.find_book(id).await? {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(book_id = %id, "Book not found");
                Err(AppError::NotFound(format!("Book with id {} not found", id)))
            }
        }
    }

    async fn require_customer(&self, id: Uuid) -> AppResult<()> {
        match self.customers.find_customer(id).await? {
            Some(_) => Ok(()),
            None => {
                tracing::warn!(customer_id = %id, "Customer not found");
                Err(AppError::NotFound(format!("Customer with id {} not found", id)))
            }
        }
    }

    fn rental_not_found(id: Uuid) -> AppError {
        AppError::NotFound(format!("Rental with id {} not found", id))
    }

    /// Rent a book. The price is estimated from now until the requested end date.
    pub async fn rent(&self, auth: &AuthContext, request: RentalRequest) -> AppResult<Rental> {
        auth.require(Capability::RentBooks)?;

        self.require_book(request.book_id).await?;
        self.require_customer(request.customer_id).await?;

        let mut rental = Rental {
            id: Uuid::new_v4(),
            book_id: request.book_id,
            customer_id: request.customer_id,
            rent_start_date: self.now(),
            rent_end_date: request.rent_end_date,
            quantity: request.quantity,
            price: Decimal::ZERO,
        };
        rental.reprice(self.price_per_day);

        self.rentals.insert(&rental).await?;

        tracing::info!(
            rental_id = %rental.id,
            book_id = %rental.book_id,
            customer_id = %rental.customer_id,
            days = rental.days(),
            price = %rental.price,
            "Rental created"
        );

        Ok(rental)
    }

    /// Close a rental: the end date becomes now and the price is recomputed
    /// from the actual duration before the record leaves the active set.
    pub async fn return_rental(&self, auth: &AuthContext, id: Uuid) -> AppResult<RentalDto> {
        auth.require(Capability::RentBooks)?;

        let mut details = self
            .rentals
            .find_details(id)
            .await?
            .ok_or_else(|| Self::rental_not_found(id))?;

        let now = self.now();
        details.rental.rent_end_date = now;
        details.rental.reprice(self.price_per_day);

        self.rentals.close(&details.rental, now).await?;

        tracing::info!(
            rental_id = %id,
            days = details.rental.days(),
            price = %details.rental.price,
            "Rental returned"
        );

        Ok(RentalDto::from(details))
    }

    pub async fn delete_rental(&self, auth: &AuthContext, id: Uuid) -> AppResult<()> {
        auth.require(Capability::ManageRentals)?;

        if !self.rentals.delete(id).await? {
            return Err(Self::rental_not_found(id));
        }

        tracing::info!(rental_id = %id, "Rental deleted");
        Ok(())
    }

    /// Overwrite book, customer, end date and quantity. The start date is kept
    /// and the price recomputed against the new end date.
    pub async fn update_rental(
        &self,
        auth: &AuthContext,
        id: Uuid,
        request: RentalRequest,
    ) -> AppResult<Rental> {
        auth.require(Capability::ManageRentals)?;

        let mut rental = self
            .rentals
            .find(id)
            .await?
            .ok_or_else(|| Self::rental_not_found(id))?;
        self.require_book(request.book_id).await?;
        self.require_customer(request.customer_id).await?;

        rental.book_id = request.book_id;
        rental.customer_id = request.customer_id;
        rental.rent_end_date = request.rent_end_date;
        rental.quantity = request.quantity;
        rental.reprice(self.price_per_day);

        self.rentals.update(&rental).await?;

        tracing::info!(rental_id = %id, price = %rental.price, "Rental updated");
        Ok(rental)
    }

    pub async fn list_rentals(&self, auth: &AuthContext) -> AppResult<Vec<RentalDto>> {
        auth.require(Capability::ReadRentals)?;

        let rentals = self.rentals.list_details().await?;
        tracing::debug!(count = rentals.len(), "Listed rentals");
        Ok(rentals.into_iter().map(RentalDto::from).collect())
    }

    pub async fn get_rental(&self, auth: &AuthContext, id: Uuid) -> AppResult<RentalDto> {
        auth.require(Capability::ReadRentals)?;

        self.rentals
            .find_details(id)
            .await?
            .map(RentalDto::from)
            .ok_or_else(|| Self::rental_not_found(id))
    }

    /// Active rentals of the customer owning `email`
    pub async fn customer_summary(
        &self,
        auth: &AuthContext,
        email: &str,
    ) -> AppResult<Vec<RentalDto>> {
        auth.require(Capability::ReadRentals)?;

        let customer = self
            .customers
            .list_customers()
            .await?
            .into_iter()
            .find(|c| c.email == email)
            .ok_or_else(|| {
                tracing::warn!(email, "No customer matches email");
                AppError::NotFound(format!("Customer with email {} not found", email))
            })?;

        let rentals = self.rentals.list_details().await?;

        Ok(rentals
            .into_iter()
            .filter(|d| d.rental.customer_id == customer.id)
            .map(RentalDto::from)
            .collect())
    }
}
