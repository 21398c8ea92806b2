//! In-memory storage and request helpers shared by API tests

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use bookrent_server::{
    api,
    config::AppConfig,
    error::{AppError, AppResult},
    models::{AuthClaims, Book, BookShort, Customer, CustomerShort, Rental, RentalDetails, Role},
    repository::{BookLookup, CustomerLookup, RentalStore},
    services::{export::ExportService, rentals::RentalsService, Services},
    AppState,
};

pub const SECRET: &str = "integration-secret";

pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 9, 2, 9, 0, 0).unwrap()
}

#[derive(Default)]
pub struct MemoryStore {
    pub books: Mutex<HashMap<Uuid, Book>>,
    pub customers: Mutex<Vec<Customer>>,
    pub rentals: Mutex<Vec<Rental>>,
    pub returned: Mutex<Vec<Rental>>,
}

impl MemoryStore {
    pub fn add_book(&self, title: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.books.lock().unwrap().insert(
            id,
            Book {
                id,
                title: title.to_string(),
                author: None,
            },
        );
        id
    }

    pub fn add_customer(&self, first_name: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.customers.lock().unwrap().push(Customer {
            id,
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            email: email.to_string(),
        });
        id
    }

    /// Seed an active rental that started `days_ago` days before `fixed_now`
    pub fn add_rental(&self, book_id: Uuid, customer_id: Uuid, days_ago: i64, quantity: i32) -> Uuid {
        let start = fixed_now() - Duration::days(days_ago);
        let mut rental = Rental {
            id: Uuid::new_v4(),
            book_id,
            customer_id,
            rent_start_date: start,
            rent_end_date: start + Duration::days(3),
            quantity,
            price: Decimal::ZERO,
        };
        rental.reprice(Decimal::TEN);
        let id = rental.id;
        self.rentals.lock().unwrap().push(rental);
        id
    }

    fn details(&self, rental: &Rental) -> RentalDetails {
        let book = self
            .books
            .lock()
            .unwrap()
            .get(&rental.book_id)
            .map(BookShort::from);
        let customer = self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == rental.customer_id)
            .map(CustomerShort::from);

        RentalDetails {
            rental: rental.clone(),
            book,
            customer,
        }
    }

    pub fn active(&self) -> Vec<Rental> {
        self.rentals.lock().unwrap().clone()
    }

    pub fn returned(&self) -> Vec<Rental> {
        self.returned.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookLookup for MemoryStore {
    async fn find_book(&self, id: Uuid) -> AppResult<Option<Book>> {
        Ok(self.books.lock().unwrap().get(&id).cloned())
    }
}

#[async_trait]
impl CustomerLookup for MemoryStore {
    async fn find_customer(&self, id: Uuid) -> AppResult<Option<Customer>> {
        Ok(self
            .customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn list_customers(&self) -> AppResult<Vec<Customer>> {
        Ok(self.customers.lock().unwrap().clone())
    }
}

#[async_trait]
impl RentalStore for MemoryStore {
    async fn insert(&self, rental: &Rental) -> AppResult<()> {
        self.rentals.lock().unwrap().push(rental.clone());
        Ok(())
    }

    async fn find(&self, id: Uuid) -> AppResult<Option<Rental>> {
        Ok(self.active().into_iter().find(|r| r.id == id))
    }

    async fn find_details(&self, id: Uuid) -> AppResult<Option<RentalDetails>> {
        Ok(self
            .active()
            .iter()
            .find(|r| r.id == id)
            .map(|r| self.details(r)))
    }

    async fn list_details(&self) -> AppResult<Vec<RentalDetails>> {
        Ok(self.active().iter().map(|r| self.details(r)).collect())
    }

    async fn update(&self, rental: &Rental) -> AppResult<()> {
        let mut rentals = self.rentals.lock().unwrap();
        match rentals.iter_mut().find(|r| r.id == rental.id) {
            Some(slot) => {
                *slot = rental.clone();
                Ok(())
            }
            None => Err(AppError::NotFound("Rental not found".to_string())),
        }
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut rentals = self.rentals.lock().unwrap();
        let before = rentals.len();
        rentals.retain(|r| r.id != id);
        Ok(rentals.len() < before)
    }

    async fn close(&self, rental: &Rental, _returned_at: DateTime<Utc>) -> AppResult<()> {
        let mut rentals = self.rentals.lock().unwrap();
        let before = rentals.len();
        rentals.retain(|r| r.id != rental.id);
        if rentals.len() == before {
            return Err(AppError::NotFound("Rental not found".to_string()));
        }
        self.returned.lock().unwrap().push(rental.clone());
        Ok(())
    }

    async fn list_returned(&self) -> AppResult<Vec<RentalDetails>> {
        Ok(self.returned().iter().map(|r| self.details(r)).collect())
    }
}

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    pub router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::default());

        let mut config = AppConfig::default();
        config.auth.jwt_secret = SECRET.to_string();
        config.rental.price_per_day = Decimal::TEN;

        let rentals = RentalsService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            config.rental.price_per_day,
        )
        .with_clock(Arc::new(fixed_now));
        let export = ExportService::new(store.clone());

        let state = AppState {
            config: Arc::new(config),
            services: Arc::new(Services { rentals, export }),
        };

        Self {
            store,
            router: api::create_router(state),
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        role: Option<Role>,
        body: Option<Value>,
    ) -> (StatusCode, Vec<u8>, Option<String>) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(role) = role {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token(role)));
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let disposition = response
            .headers()
            .get(header::CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        (status, bytes.to_vec(), disposition)
    }

    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        role: Option<Role>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let (status, bytes, _) = self.send(method, uri, role, body).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }
}

pub fn token(role: Role) -> String {
    let now = Utc::now().timestamp();
    AuthClaims {
        sub: role.to_string(),
        customer_id: None,
        role,
        exp: now + 3600,
        iat: now,
    }
    .create_token(SECRET)
    .unwrap()
}
