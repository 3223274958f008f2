pub mod analysis;
pub mod files;
pub mod store;

pub use analysis::StubAnalysisAdapter;
pub use files::LocalFileStore;
pub use store::InMemoryStore;
