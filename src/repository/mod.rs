//! Repository layer for database operations

pub mod books;
pub mod customers;
pub mod rentals;
pub mod traits;

use sqlx::{Pool, Postgres};

pub use traits::{BookLookup, CustomerLookup, RentalStore};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub books: books::BooksRepository,
    pub customers: customers::CustomersRepository,
    pub rentals: rentals::RentalsRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            books: books::BooksRepository::new(pool.clone()),
            customers: customers::CustomersRepository::new(pool.clone()),
            rentals: rentals::RentalsRepository::new(pool.clone()),
            pool,
        }
    }
}
