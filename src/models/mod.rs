//! Data models for the rental server

pub mod auth;
pub mod book;
pub mod customer;
pub mod rental;

// Re-export commonly used types
pub use auth::{AuthClaims, AuthContext, Capability, Role};
pub use book::{Book, BookShort};
pub use customer::{Customer, CustomerShort};
pub use rental::{Rental, RentalDetails, RentalDto, RentalRequest};
