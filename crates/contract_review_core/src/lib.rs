pub mod domain;
pub mod ports;

pub use domain::{
    Contract, ContractStatus, Identity, Issue, Review, RiskAssessment, User, UserCredentials,
};
pub use ports::{ContractAnalysisService, FileStorageService, PortError, PortResult, StorageService};
