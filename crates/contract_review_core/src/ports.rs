//! crates/contract_review_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like databases or APIs.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Contract, Review, RiskAssessment, User};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
///
/// Every failure here is deterministic and terminal: nothing is retried, and
/// callers can translate each variant directly to a response status.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    /// Bad or missing input supplied by the caller.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// Login credentials did not match any stored record.
    #[error("Authentication failed: {0}")]
    Authentication(String),
    /// A bearer token was missing, malformed, expired, or forged.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),
    /// The requested contract or review does not exist for this caller.
    #[error("Item not found: {0}")]
    NotFound(String),
    /// Anything the other variants do not cover.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait StorageService: Send + Sync {
    // --- Credential Store ---

    /// Registers a new user. Fails with `Validation` when any field is empty
    /// or the email is already taken.
    async fn register_user(&self, name: &str, email: &str, secret: &str) -> PortResult<User>;

    /// Returns the user whose email AND secret both match exactly, or
    /// `Authentication` otherwise.
    async fn find_user_by_credentials(&self, email: &str, secret: &str) -> PortResult<User>;

    // --- Contract Registry ---

    /// Records a freshly uploaded contract with status `Pending`.
    async fn insert_contract(
        &self,
        owner_id: Uuid,
        file_name: &str,
        file_ref: &str,
    ) -> PortResult<Contract>;

    /// All contracts owned by `owner_id`, in insertion order. Never contains
    /// another owner's contracts.
    async fn contracts_for_owner(&self, owner_id: Uuid) -> PortResult<Vec<Contract>>;

    /// Removes the contract when it exists and is owned by `owner_id`,
    /// cascading deletion of its review. Idempotent: an unknown or foreign
    /// id is a no-op, never an error.
    async fn delete_contract(&self, owner_id: Uuid, contract_id: Uuid) -> PortResult<()>;

    // --- Reviews ---

    /// The stored review for one of the caller's contracts. `NotFound` when
    /// the contract is missing, foreign, or not yet reviewed.
    async fn review_for_contract(&self, owner_id: Uuid, contract_id: Uuid) -> PortResult<Review>;

    /// Persists an assessment as the contract's review, replacing any prior
    /// one, and transitions the contract Pending -> Analyzed. `NotFound`
    /// unless the caller owns the contract.
    async fn save_review(
        &self,
        owner_id: Uuid,
        contract_id: Uuid,
        assessment: RiskAssessment,
    ) -> PortResult<Review>;
}

#[async_trait]
pub trait FileStorageService: Send + Sync {
    /// Persists raw file bytes and returns an opaque location reference that
    /// the contract registry stores verbatim.
    async fn store_file(&self, file_name: &str, bytes: &[u8]) -> PortResult<String>;
}

#[async_trait]
pub trait ContractAnalysisService: Send + Sync {
    /// Produces a risk assessment for the file behind `file_ref`.
    async fn analyze(&self, file_ref: &str) -> PortResult<RiskAssessment>;
}
