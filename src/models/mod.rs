pub mod collection;
pub mod concept;
pub mod concept_scheme;
pub mod in_collection;
pub mod in_scheme;
pub mod semantic_relation;
