//! Domain layer - Pure glossary abstractions
//!
//! This layer contains no entities and no parsing code.
//! Only records, trait definitions and domain error types.

pub mod errors;
pub mod glossary;
pub mod repositories;

pub use errors::DomainError;
pub use glossary::*;
pub use repositories::*;
