//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use crate::web::token::TokenIssuer;
use contract_review_core::ports::{ContractAnalysisService, FileStorageService, StorageService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StorageService>,
    pub files: Arc<dyn FileStorageService>,
    pub analysis: Arc<dyn ContractAnalysisService>,
    pub tokens: TokenIssuer,
    pub config: Arc<Config>,
}
