//! Customer model as seen by the rental core

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Customer row from the accounts table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Short customer representation joined onto rentals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerShort {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl CustomerShort {
    /// Name shown in listings and reports
    pub fn display_name(&self) -> &str {
        &self.first_name
    }
}

impl From<&Customer> for CustomerShort {
    fn from(customer: &Customer) -> Self {
        CustomerShort {
            id: customer.id,
            first_name: customer.first_name.clone(),
            last_name: customer.last_name.clone(),
            email: customer.email.clone(),
        }
    }
}
