//! Book model as seen by the rental core

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Book row from the catalog table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author: Option<String>,
}

/// Short book representation joined onto rentals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: Uuid,
    pub title: String,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        BookShort {
            id: book.id,
            title: book.title.clone(),
        }
    }
}
