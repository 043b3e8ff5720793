//! In-memory SKOS records and their localized DTOs
//!
//! Records are built by the SKOS parser or loaded back from the database.
//! Labels are kept per language and only resolved to a single string when a
//! record is turned into a DTO for a caller.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use super::DomainError;

/// Language used when a label is missing in the requested language
pub const DEFAULT_LANGUAGE: &str = "en";

/// Language code -> text
pub type LocalizedText = BTreeMap<String, String>;

/// Resolve a localized value: requested language, then English, then "".
pub fn get_in_language(values: &LocalizedText, lang: &str) -> String {
    values
        .get(lang)
        .or_else(|| values.get(DEFAULT_LANGUAGE))
        .cloned()
        .unwrap_or_default()
}

/// Kinds of SKOS semantic relations.
///
/// Transitive kinds are stored exactly as they appear in the source data;
/// no closure is ever computed from the direct ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SemanticRelationType {
    Broader,
    Narrower,
    Related,
    BroaderTransitive,
    NarrowerTransitive,
}

impl SemanticRelationType {
    pub const ALL: [SemanticRelationType; 5] = [
        SemanticRelationType::Broader,
        SemanticRelationType::Narrower,
        SemanticRelationType::Related,
        SemanticRelationType::BroaderTransitive,
        SemanticRelationType::NarrowerTransitive,
    ];

    /// The SKOS local name, also used as the stored value
    pub fn as_str(&self) -> &'static str {
        match self {
            SemanticRelationType::Broader => "broader",
            SemanticRelationType::Narrower => "narrower",
            SemanticRelationType::Related => "related",
            SemanticRelationType::BroaderTransitive => "broaderTransitive",
            SemanticRelationType::NarrowerTransitive => "narrowerTransitive",
        }
    }
}

impl fmt::Display for SemanticRelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticRelationType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticRelationType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::Internal(format!("Unknown semantic relation type: {}", s)))
    }
}

/// A SKOS concept scheme (a taxonomy or classification)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConceptScheme {
    pub iri: String,
    pub notation: String,
    pub scope_note: String,
    pub pref_labels: LocalizedText,
}

impl ConceptScheme {
    pub fn to_dto(&self, lang: &str) -> ConceptSchemeDto {
        ConceptSchemeDto {
            iri: self.iri.clone(),
            notation: self.notation.clone(),
            scope_note: self.scope_note.clone(),
            pref_label: get_in_language(&self.pref_labels, lang),
        }
    }
}

/// A SKOS concept
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Concept {
    pub iri: String,
    pub identifier: String,
    pub notation: String,
    pub pref_labels: LocalizedText,
    pub alt_labels: LocalizedText,
    pub scope_notes: LocalizedText,
    /// IRIs of the concept schemes the concept belongs to
    pub scheme_iris: Vec<String>,
}

impl Concept {
    pub fn pref_label(&self, lang: &str) -> String {
        get_in_language(&self.pref_labels, lang)
    }

    pub fn to_dto(&self, lang: &str) -> ConceptDto {
        ConceptDto {
            iri: self.iri.clone(),
            identifier: self.identifier.clone(),
            notation: self.notation.clone(),
            pref_label: self.pref_label(lang),
            alt_label: get_in_language(&self.alt_labels, lang),
            scope_note: get_in_language(&self.scope_notes, lang),
        }
    }
}

/// A SKOS collection: a labelled group of concepts and other collections
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Collection {
    pub iri: String,
    pub notation: String,
    pub pref_labels: LocalizedText,
    pub scheme_iris: Vec<String>,
}

impl Collection {
    pub fn to_dto(&self, lang: &str) -> CollectionDto {
        CollectionDto {
            iri: self.iri.clone(),
            notation: self.notation.clone(),
            pref_label: get_in_language(&self.pref_labels, lang),
        }
    }
}

/// Directed, typed link between two concepts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SemanticRelation {
    pub relation_type: SemanticRelationType,
    pub source_concept_iri: String,
    pub target_concept_iri: String,
}

impl SemanticRelation {
    pub fn to_dto(&self) -> RelationDto {
        RelationDto {
            relation_type: self.relation_type.as_str().to_string(),
            source_concept_iri: self.source_concept_iri.clone(),
            target_concept_iri: self.target_concept_iri.clone(),
        }
    }
}

/// Membership of a concept or collection in a collection
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InCollection {
    pub collection_iri: String,
    pub member_iri: String,
}

/// Membership of a concept or collection in a concept scheme
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InScheme {
    pub scheme_iri: String,
    pub member_iri: String,
}

/// Every record extracted from one SKOS document
#[derive(Debug, Clone, Default)]
pub struct ParsedDataset {
    pub concept_schemes: Vec<ConceptScheme>,
    pub concepts: Vec<Concept>,
    pub collections: Vec<Collection>,
    pub semantic_relations: Vec<SemanticRelation>,
    pub in_collections: Vec<InCollection>,
}

impl ParsedDataset {
    /// Scheme memberships, collections first and then concepts
    pub fn in_schemes(&self) -> Vec<InScheme> {
        let concept_memberships = self
            .concepts
            .iter()
            .flat_map(|c| c.scheme_iris.iter().map(move |s| (s, &c.iri)));
        let collection_memberships = self
            .collections
            .iter()
            .flat_map(|c| c.scheme_iris.iter().map(move |s| (s, &c.iri)));

        collection_memberships
            .chain(concept_memberships)
            .map(|(scheme_iri, member_iri)| InScheme {
                scheme_iri: scheme_iri.clone(),
                member_iri: member_iri.clone(),
            })
            .collect()
    }
}

/// Members of a collection, split by kind
#[derive(Debug, Clone, Default)]
pub struct CollectionMembers {
    pub concepts: Vec<Concept>,
    pub collections: Vec<Collection>,
}

// DTOs returned by the query layer

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptSchemeDto {
    pub iri: String,
    pub notation: String,
    pub scope_note: String,
    pub pref_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConceptDto {
    pub iri: String,
    pub identifier: String,
    pub notation: String,
    pub pref_label: String,
    pub alt_label: String,
    pub scope_note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDto {
    pub iri: String,
    pub notation: String,
    pub pref_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationDto {
    #[serde(rename = "type")]
    pub relation_type: String,
    pub source_concept_iri: String,
    pub target_concept_iri: String,
}

/// A concept together with its schemes and relations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullConceptDto {
    #[serde(flatten)]
    pub concept: ConceptDto,
    pub concept_schemes: Vec<String>,
    pub relations: Vec<RelationDto>,
}

/// A collection together with its members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FullCollectionDto {
    #[serde(flatten)]
    pub collection: CollectionDto,
    pub collections: Vec<CollectionDto>,
    pub concepts: Vec<ConceptDto>,
}
