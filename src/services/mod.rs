//! Business logic services

pub mod export;
pub mod rentals;

use std::sync::Arc;

use crate::{config::RentalConfig, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub rentals: rentals::RentalsService,
    pub export: export::ExportService,
}

impl Services {
    /// Create all services backed by the Postgres repository
    pub fn new(repository: Repository, rental_config: RentalConfig) -> Self {
        let rental_store = Arc::new(repository.rentals.clone());

        Self {
            rentals: rentals::RentalsService::new(
                Arc::new(repository.books.clone()),
                Arc::new(repository.customers.clone()),
                rental_store.clone(),
                rental_config.price_per_day,
            ),
            export: export::ExportService::new(rental_store),
        }
    }
}
