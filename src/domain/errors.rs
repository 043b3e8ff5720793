//! Domain error types
//!
//! These errors are framework-agnostic and represent glossary-level failures.

use std::fmt;

#[derive(Debug)]
pub enum DomainError {
    /// Entity not found, carries a human readable description
    NotFound(String),
    /// Malformed or unreadable XML document
    Xml(String),
    /// Database/persistence error
    Database(String),
    /// Remote dataset could not be fetched
    External(String),
    /// Local file system error
    Io(String),
    /// Missing or invalid configuration
    Configuration(String),
    /// Generic internal error
    Internal(String),
}

impl DomainError {
    pub fn concept_not_found(iri: &str) -> Self {
        DomainError::NotFound(format!("Concept {} not found.", iri))
    }

    pub fn collection_not_found(iri: &str) -> Self {
        DomainError::NotFound(format!("Collection {} not found.", iri))
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::NotFound(msg) => write!(f, "Not found: {}", msg),
            DomainError::Xml(msg) => write!(f, "XML error: {}", msg),
            DomainError::Database(msg) => write!(f, "Database error: {}", msg),
            DomainError::External(msg) => write!(f, "External service error: {}", msg),
            DomainError::Io(msg) => write!(f, "I/O error: {}", msg),
            DomainError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            DomainError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DomainError {}

// Conversion from SeaORM errors (used in infrastructure layer)
impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Database(e.to_string())
    }
}

impl From<quick_xml::Error> for DomainError {
    fn from(e: quick_xml::Error) -> Self {
        DomainError::Xml(e.to_string())
    }
}

impl From<reqwest::Error> for DomainError {
    fn from(e: reqwest::Error) -> Self {
        DomainError::External(e.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(e: std::io::Error) -> Self {
        DomainError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
