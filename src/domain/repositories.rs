//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;
use super::glossary::{
    Collection, CollectionMembers, Concept, ConceptScheme, ParsedDataset, SemanticRelation,
};

/// Repository for the persisted glossary
#[async_trait]
pub trait GlossaryRepository: Send + Sync {
    /// Drop and recreate every glossary table
    async fn reset(&self) -> Result<(), DomainError>;

    /// Persist all records of one dataset; either everything commits or nothing does
    async fn save_dataset(&self, dataset: &ParsedDataset) -> Result<(), DomainError>;

    /// Find all concept schemes
    async fn find_concept_schemes(&self) -> Result<Vec<ConceptScheme>, DomainError>;

    /// Find the concepts that are members of a concept scheme
    async fn find_concepts_by_scheme(&self, scheme_iri: &str)
    -> Result<Vec<Concept>, DomainError>;

    /// Find a single concept by IRI
    async fn find_concept(&self, iri: &str) -> Result<Option<Concept>, DomainError>;

    /// Find concepts with a preferred label in any language containing `term`, ignoring case
    async fn find_concepts_by_label(&self, term: &str) -> Result<Vec<Concept>, DomainError>;

    /// Find relations where the concept is either the source or the target
    async fn find_relations(&self, concept_iri: &str)
    -> Result<Vec<SemanticRelation>, DomainError>;

    /// Find a single collection by IRI
    async fn find_collection(&self, iri: &str) -> Result<Option<Collection>, DomainError>;

    /// Find the concepts and collections that are members of a collection
    async fn find_collection_members(
        &self,
        collection_iri: &str,
    ) -> Result<CollectionMembers, DomainError>;
}
