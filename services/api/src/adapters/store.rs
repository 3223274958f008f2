//! services/api/src/adapters/store.rs
//!
//! This module contains the in-memory storage adapter, which is the concrete
//! implementation of the `StorageService` port from the `core` crate. Each
//! collection sits behind its own `RwLock`, so every read-modify-write runs
//! to completion before another mutation can start.

use async_trait::async_trait;
use chrono::Utc;
use contract_review_core::domain::{
    Contract, ContractStatus, Review, RiskAssessment, User, UserCredentials,
};
use contract_review_core::ports::{PortError, PortResult, StorageService};
use tokio::sync::RwLock;
use uuid::Uuid;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An in-memory storage adapter that implements the `StorageService` port.
///
/// Lock order for operations touching more than one collection: contracts
/// before reviews.
#[derive(Default)]
pub struct InMemoryStore {
    users: RwLock<Vec<UserCredentials>>,
    contracts: RwLock<Vec<Contract>>,
    reviews: RwLock<Vec<Review>>,
}

impl InMemoryStore {
    /// Creates a new, empty `InMemoryStore`.
    pub fn new() -> Self {
        Self::default()
    }
}

//=========================================================================================
// `StorageService` Trait Implementation
//=========================================================================================

#[async_trait]
impl StorageService for InMemoryStore {
    async fn register_user(&self, name: &str, email: &str, secret: &str) -> PortResult<User> {
        if name.is_empty() || email.is_empty() || secret.is_empty() {
            return Err(PortError::Validation("Missing fields".to_string()));
        }

        let mut users = self.users.write().await;
        if users.iter().any(|u| u.email == email) {
            return Err(PortError::Validation(format!(
                "Email {} is already registered",
                email
            )));
        }

        let record = UserCredentials {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            secret: secret.to_string(),
            created_at: Utc::now(),
        };
        let user = record.to_user();
        users.push(record);
        Ok(user)
    }

    async fn find_user_by_credentials(&self, email: &str, secret: &str) -> PortResult<User> {
        let users = self.users.read().await;
        users
            .iter()
            .find(|u| u.email == email && u.secret == secret)
            .map(UserCredentials::to_user)
            .ok_or_else(|| PortError::Authentication("Invalid email or password".to_string()))
    }

    async fn insert_contract(
        &self,
        owner_id: Uuid,
        file_name: &str,
        file_ref: &str,
    ) -> PortResult<Contract> {
        let contract = Contract {
            id: Uuid::new_v4(),
            owner_id,
            file_name: file_name.to_string(),
            file_ref: file_ref.to_string(),
            uploaded_at: Utc::now(),
            status: ContractStatus::Pending,
            risk_score: None,
        };
        self.contracts.write().await.push(contract.clone());
        Ok(contract)
    }

    async fn contracts_for_owner(&self, owner_id: Uuid) -> PortResult<Vec<Contract>> {
        let contracts = self.contracts.read().await;
        Ok(contracts
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn delete_contract(&self, owner_id: Uuid, contract_id: Uuid) -> PortResult<()> {
        let mut contracts = self.contracts.write().await;
        let before = contracts.len();
        contracts.retain(|c| !(c.id == contract_id && c.owner_id == owner_id));

        // Cascade only when the caller actually owned the contract, so one
        // user cannot strip another user's review.
        if contracts.len() != before {
            let mut reviews = self.reviews.write().await;
            reviews.retain(|r| r.contract_id != contract_id);
        }
        Ok(())
    }

    async fn review_for_contract(&self, owner_id: Uuid, contract_id: Uuid) -> PortResult<Review> {
        let contracts = self.contracts.read().await;
        contracts
            .iter()
            .find(|c| c.id == contract_id && c.owner_id == owner_id)
            .ok_or_else(|| PortError::NotFound(format!("Contract {} not found", contract_id)))?;
        drop(contracts);

        let reviews = self.reviews.read().await;
        reviews
            .iter()
            .find(|r| r.contract_id == contract_id)
            .cloned()
            .ok_or_else(|| PortError::NotFound("Review not found".to_string()))
    }

    async fn save_review(
        &self,
        owner_id: Uuid,
        contract_id: Uuid,
        assessment: RiskAssessment,
    ) -> PortResult<Review> {
        let mut contracts = self.contracts.write().await;
        let contract = contracts
            .iter_mut()
            .find(|c| c.id == contract_id && c.owner_id == owner_id)
            .ok_or_else(|| PortError::NotFound(format!("Contract {} not found", contract_id)))?;

        let review = Review {
            contract_id,
            risk_score: assessment.risk_score,
            issues: assessment.issues,
        };

        // Replace any prior review: at most one review exists per contract.
        let mut reviews = self.reviews.write().await;
        reviews.retain(|r| r.contract_id != contract_id);
        reviews.push(review.clone());

        contract.status = ContractStatus::Analyzed;
        contract.risk_score = Some(review.risk_score);
        Ok(review)
    }
}

//=========================================================================================
// Tests
//=========================================================================================
