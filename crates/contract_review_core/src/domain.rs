//! crates/contract_review_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any database or serialization format.

use chrono::{DateTime, Utc};
use uuid::Uuid;

// Represents a registered user - used throughout the app
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// Only used internally for registration/login - contains the shared secret.
// The secret is stored exactly as given; hashing is out of scope here.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub secret: String,
    pub created_at: DateTime<Utc>,
}

impl UserCredentials {
    /// Strips the secret, leaving the shareable user record.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            created_at: self.created_at,
        }
    }
}

/// The identity resolved from a verified bearer token, attached to the
/// request context by the authorization gate.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub email: String,
}

/// The analysis state of an uploaded contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractStatus {
    Pending,
    Analyzed,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Pending => "Pending",
            ContractStatus::Analyzed => "Analyzed",
        }
    }
}

/// Represents an uploaded contract. The raw bytes live behind `file_ref`,
/// an opaque location handed back by the file storage collaborator.
#[derive(Debug, Clone)]
pub struct Contract {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub file_name: String,
    pub file_ref: String,
    pub uploaded_at: DateTime<Utc>,
    pub status: ContractStatus,
    pub risk_score: Option<u8>,
}

/// A single flagged clause within a review.
#[derive(Debug, Clone)]
pub struct Issue {
    pub clause: String,
    pub risk: String,
    pub recommendation: String,
    pub severity: Option<String>,
    pub explanation: Option<String>,
}

/// The stored risk review for a contract. At most one exists per contract;
/// regenerating replaces the previous one.
#[derive(Debug, Clone)]
pub struct Review {
    pub contract_id: Uuid,
    pub risk_score: u8,
    pub issues: Vec<Issue>,
}

/// The raw output of the analysis capability, before it is bound to a
/// contract and persisted as a `Review`.
#[derive(Debug, Clone)]
pub struct RiskAssessment {
    pub risk_score: u8,
    pub issues: Vec<Issue>,
}
