//! Services Layer
//!
//! Glossary logic on top of the repository traits. The CLI calls these
//! directly; nothing in here knows about sea-orm.

pub mod glossary_service;
pub mod ingest_service;

// Re-export for convenience
pub use glossary_service::{GlossaryService, version};
pub use ingest_service::{FailedDataset, InitDatasetsReport, SavedDataset, init_datasets};
