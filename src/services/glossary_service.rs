//! Glossary Service - localized read access to the persisted glossary
//!
//! Records come back from the repository with every language; they are only
//! localized here, when turned into DTOs for the caller.

use std::sync::Arc;

use crate::domain::{
    ConceptDto, ConceptSchemeDto, DomainError, FullCollectionDto, FullConceptDto,
    GlossaryRepository, RelationDto,
};

pub struct GlossaryService {
    repository: Arc<dyn GlossaryRepository>,
}

impl GlossaryService {
    pub fn new(repository: Arc<dyn GlossaryRepository>) -> Self {
        Self { repository }
    }

    /// All concept schemes
    pub async fn get_concept_schemes(
        &self,
        lang: &str,
    ) -> Result<Vec<ConceptSchemeDto>, DomainError> {
        let schemes = self.repository.find_concept_schemes().await?;
        Ok(schemes.iter().map(|s| s.to_dto(lang)).collect())
    }

    /// Concepts belonging to a concept scheme
    pub async fn get_concepts(
        &self,
        concept_scheme_iri: &str,
        lang: &str,
    ) -> Result<Vec<ConceptDto>, DomainError> {
        let concepts = self
            .repository
            .find_concepts_by_scheme(concept_scheme_iri)
            .await?;
        tracing::debug!(
            "Scheme {} has {} concepts",
            concept_scheme_iri,
            concepts.len()
        );
        Ok(concepts.iter().map(|c| c.to_dto(lang)).collect())
    }

    /// A single concept, `None` when the IRI is unknown
    pub async fn get_concept(
        &self,
        concept_iri: &str,
        lang: &str,
    ) -> Result<Option<ConceptDto>, DomainError> {
        let concept = self.repository.find_concept(concept_iri).await?;
        Ok(concept.map(|c| c.to_dto(lang)))
    }

    /// Relations where the concept is the source or the target
    pub async fn get_relations(&self, concept_iri: &str) -> Result<Vec<RelationDto>, DomainError> {
        let relations = self.repository.find_relations(concept_iri).await?;
        Ok(relations.iter().map(|r| r.to_dto()).collect())
    }

    /// A concept with its scheme IRIs and relations
    pub async fn get_full_concept(
        &self,
        concept_iri: &str,
        lang: &str,
    ) -> Result<FullConceptDto, DomainError> {
        let concept = self
            .repository
            .find_concept(concept_iri)
            .await?
            .ok_or_else(|| DomainError::concept_not_found(concept_iri))?;
        let relations = self.get_relations(concept_iri).await?;

        Ok(FullConceptDto {
            concept: concept.to_dto(lang),
            concept_schemes: concept.scheme_iris,
            relations,
        })
    }

    /// A collection with its member concepts and member collections
    pub async fn get_collection(
        &self,
        collection_iri: &str,
        lang: &str,
    ) -> Result<FullCollectionDto, DomainError> {
        let collection = self
            .repository
            .find_collection(collection_iri)
            .await?
            .ok_or_else(|| DomainError::collection_not_found(collection_iri))?;
        let members = self
            .repository
            .find_collection_members(collection_iri)
            .await?;

        Ok(FullCollectionDto {
            collection: collection.to_dto(lang),
            collections: members.collections.iter().map(|c| c.to_dto(lang)).collect(),
            concepts: members.concepts.iter().map(|c| c.to_dto(lang)).collect(),
        })
    }

    /// Concepts whose preferred label in `lang` contains `search_term`, ignoring case.
    ///
    /// A blank term matches nothing.
    pub async fn search_concepts(
        &self,
        search_term: &str,
        lang: &str,
    ) -> Result<Vec<ConceptDto>, DomainError> {
        let term = search_term.trim();
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let needle = term.to_lowercase();
        let candidates = self.repository.find_concepts_by_label(term).await?;

        let results: Vec<ConceptDto> = candidates
            .iter()
            .filter(|c| c.pref_label(lang).to_lowercase().contains(&needle))
            .map(|c| c.to_dto(lang))
            .collect();

        tracing::info!(
            "Search '{}' ({}) returned {} of {} candidates",
            term,
            lang,
            results.len(),
            candidates.len()
        );
        Ok(results)
    }
}

/// Version of the running crate
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        Collection, CollectionMembers, Concept, ConceptScheme, LocalizedText, ParsedDataset,
        SemanticRelation, SemanticRelationType,
    };
    use async_trait::async_trait;

    /// In-memory repository over a fixed dataset
    struct FixedRepository {
        dataset: ParsedDataset,
    }

    #[async_trait]
    impl GlossaryRepository for FixedRepository {
        async fn reset(&self) -> Result<(), DomainError> {
            Ok(())
        }

        async fn save_dataset(&self, _dataset: &ParsedDataset) -> Result<(), DomainError> {
            Ok(())
        }

        async fn find_concept_schemes(&self) -> Result<Vec<ConceptScheme>, DomainError> {
            Ok(self.dataset.concept_schemes.clone())
        }

        async fn find_concepts_by_scheme(
            &self,
            scheme_iri: &str,
        ) -> Result<Vec<Concept>, DomainError> {
            Ok(self
                .dataset
                .concepts
                .iter()
                .filter(|c| c.scheme_iris.iter().any(|s| s == scheme_iri))
                .cloned()
                .collect())
        }

        async fn find_concept(&self, iri: &str) -> Result<Option<Concept>, DomainError> {
            Ok(self.dataset.concepts.iter().find(|c| c.iri == iri).cloned())
        }

        async fn find_concepts_by_label(&self, _term: &str) -> Result<Vec<Concept>, DomainError> {
            Ok(self.dataset.concepts.clone())
        }

        async fn find_relations(
            &self,
            concept_iri: &str,
        ) -> Result<Vec<SemanticRelation>, DomainError> {
            Ok(self
                .dataset
                .semantic_relations
                .iter()
                .filter(|r| {
                    r.source_concept_iri == concept_iri || r.target_concept_iri == concept_iri
                })
                .cloned()
                .collect())
        }

        async fn find_collection(&self, iri: &str) -> Result<Option<Collection>, DomainError> {
            Ok(self.dataset.collections.iter().find(|c| c.iri == iri).cloned())
        }

        async fn find_collection_members(
            &self,
            _collection_iri: &str,
        ) -> Result<CollectionMembers, DomainError> {
            Ok(CollectionMembers::default())
        }
    }

    fn labels(entries: &[(&str, &str)]) -> LocalizedText {
        entries
            .iter()
            .map(|(lang, text)| (lang.to_string(), text.to_string()))
            .collect()
    }

    fn service() -> GlossaryService {
        let dataset = ParsedDataset {
            concept_schemes: vec![ConceptScheme {
                iri: "scheme_iri0".to_string(),
                notation: "notation0".to_string(),
                scope_note: "scopeNote0".to_string(),
                pref_labels: labels(&[("en", "prefLabel0"), ("de", "Vorzugsname0")]),
            }],
            concepts: vec![
                Concept {
                    iri: "concept_iri0".to_string(),
                    identifier: "identifier0".to_string(),
                    notation: "notation0".to_string(),
                    pref_labels: labels(&[("en", "Live horses"), ("fr", "Chevaux vivants")]),
                    scheme_iris: vec!["scheme_iri0".to_string()],
                    ..Default::default()
                },
                Concept {
                    iri: "concept_iri1".to_string(),
                    pref_labels: labels(&[("en", "Live asses")]),
                    ..Default::default()
                },
            ],
            semantic_relations: vec![SemanticRelation {
                relation_type: SemanticRelationType::Related,
                source_concept_iri: "concept_iri0".to_string(),
                target_concept_iri: "concept_iri1".to_string(),
            }],
            ..Default::default()
        };

        GlossaryService::new(Arc::new(FixedRepository { dataset }))
    }

    #[tokio::test]
    async fn test_get_concept_schemes_is_localized() {
        let schemes = service().get_concept_schemes("de").await.unwrap();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].pref_label, "Vorzugsname0");

        let schemes = service().get_concept_schemes("it").await.unwrap();
        assert_eq!(schemes[0].pref_label, "prefLabel0");
    }

    #[tokio::test]
    async fn test_get_concept_missing_is_none() {
        let concept = service().get_concept("unknown", "en").await.unwrap();
        assert!(concept.is_none());
    }

    #[tokio::test]
    async fn test_get_full_concept() {
        let full = service().get_full_concept("concept_iri0", "fr").await.unwrap();
        assert_eq!(full.concept.pref_label, "Chevaux vivants");
        assert_eq!(full.concept_schemes, vec!["scheme_iri0".to_string()]);
        assert_eq!(full.relations.len(), 1);
        assert_eq!(full.relations[0].relation_type, "related");
    }

    #[tokio::test]
    async fn test_get_full_concept_missing_is_not_found() {
        let result = service().get_full_concept("unknown", "en").await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_collection_missing_is_not_found() {
        let result = service().get_collection("unknown", "en").await;
        assert!(matches!(result, Err(DomainError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_search_concepts_uses_localized_label() {
        let service = service();

        let results = service.search_concepts("LIVE", "en").await.unwrap();
        assert_eq!(results.len(), 2);

        // concept_iri1 has no French label and falls back to "Live asses"
        let results = service.search_concepts("chevaux", "fr").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].iri, "concept_iri0");

        assert!(service.search_concepts("  ", "en").await.unwrap().is_empty());
    }
}
