//! services/api/src/adapters/analysis.rs
//!
//! This module contains the stub analysis adapter, which implements the
//! `ContractAnalysisService` port with a fixed, deterministic assessment.
//! It stands in for a real document-analysis engine; swapping one in only
//! requires another implementation of the same port.

use async_trait::async_trait;
use contract_review_core::domain::{Issue, RiskAssessment};
use contract_review_core::ports::{ContractAnalysisService, PortResult};

/// An adapter that fabricates the same risk assessment for every contract.
#[derive(Clone, Default)]
pub struct StubAnalysisAdapter;

impl StubAnalysisAdapter {
    /// Creates a new `StubAnalysisAdapter`.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ContractAnalysisService for StubAnalysisAdapter {
    async fn analyze(&self, _file_ref: &str) -> PortResult<RiskAssessment> {
        Ok(RiskAssessment {
            risk_score: 85,
            issues: vec![Issue {
                clause: "Termination".to_string(),
                risk: "Unclear notice period".to_string(),
                recommendation: "Specify notice period of at least 30 days.".to_string(),
                severity: Some("High".to_string()),
                explanation: Some(
                    "The agreement can be ended without a defined notice window, which \
                     leaves both parties exposed to abrupt termination."
                        .to_string(),
                ),
            }],
        })
    }
}
