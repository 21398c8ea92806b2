//! Roles, capabilities and token claims

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::error::AppError;

/// Account role carried in the bearer token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Customer,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Customer => "customer",
        }
    }

    /// Whether this role is allowed to perform `capability`
    pub fn grants(&self, capability: Capability) -> bool {
        match self {
            Role::Admin => true,
            Role::Customer => matches!(capability, Capability::ReadRentals | Capability::RentBooks),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operations gated by role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// List, fetch and summarize rentals
    ReadRentals,
    /// Rent and return books
    RentBooks,
    /// Update and delete rental records
    ManageRentals,
    /// Download the full rentals report
    ExportReports,
}

impl Capability {
    fn describe(&self) -> &'static str {
        match self {
            Capability::ReadRentals => "read rentals",
            Capability::RentBooks => "rent or return books",
            Capability::ManageRentals => "manage rentals",
            Capability::ExportReports => "export reports",
        }
    }
}

/// Authorization context handed to every service operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: String,
    pub customer_id: Option<Uuid>,
    pub role: Role,
}

impl AuthContext {
    pub fn new(subject: impl Into<String>, role: Role) -> Self {
        Self {
            subject: subject.into(),
            customer_id: None,
            role,
        }
    }

    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.role.grants(capability) {
            Ok(())
        } else {
            Err(AppError::Authorization(format!(
                "Insufficient rights to {}",
                capability.describe()
            )))
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// JWT claims for authenticated callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    pub sub: String,
    pub customer_id: Option<Uuid>,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl AuthClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

impl From<AuthClaims> for AuthContext {
    fn from(claims: AuthClaims) -> Self {
        AuthContext {
            subject: claims.sub,
            customer_id: claims.customer_id,
            role: claims.role,
        }
    }
}
