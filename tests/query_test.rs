use std::path::Path;
use std::sync::Arc;

use dds_glossary::db;
use dds_glossary::domain::{DomainError, GlossaryRepository};
use dds_glossary::infrastructure::SeaOrmGlossaryRepository;
use dds_glossary::services::GlossaryService;
use dds_glossary::skos::parse_dataset_file;

const SCHEME: &str = "http://data.europa.eu/xsp/cn2024/cn2024";
const PORK_CARCASES: &str = "http://data.europa.eu/xsp/cn2024/020321000080";
const PORK_MEAT: &str = "http://data.europa.eu/xsp/cn2024/020321000010";
const HAMS: &str = "http://data.europa.eu/xsp/cn2024/020322000000";
const SECTIONS: &str = "http://data.europa.eu/xsp/cn2024/collection1";
const CHAPTERS: &str = "http://data.europa.eu/xsp/cn2024/collection2";

// Helper to build a service over an in-memory database holding the sample dataset
async fn setup_service() -> GlossaryService {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let repository = SeaOrmGlossaryRepository::new(db);

    let dataset = parse_dataset_file(Path::new("tests/data/sample.rdf"))
        .expect("Failed to parse sample dataset");
    repository
        .save_dataset(&dataset)
        .await
        .expect("Failed to save sample dataset");

    GlossaryService::new(Arc::new(repository))
}

#[tokio::test]
async fn test_concept_schemes_are_localized() {
    let service = setup_service().await;

    let schemes = service.get_concept_schemes("fr").await.unwrap();
    assert_eq!(schemes.len(), 1);
    assert_eq!(schemes[0].iri, SCHEME);
    assert_eq!(schemes[0].notation, "CN 2024");
    assert_eq!(schemes[0].pref_label, "Nomenclature combinée, 2024 (NC 2024)");

    // No German label: falls back to English
    let schemes = service.get_concept_schemes("de").await.unwrap();
    assert_eq!(schemes[0].pref_label, "Combined Nomenclature, 2024 (CN 2024)");
}

#[tokio::test]
async fn test_concepts_by_scheme_ordered_by_notation() {
    let service = setup_service().await;

    let concepts = service.get_concepts(SCHEME, "en").await.unwrap();
    let iris: Vec<&str> = concepts.iter().map(|c| c.iri.as_str()).collect();
    assert_eq!(iris, vec![PORK_MEAT, PORK_CARCASES, HAMS]);

    assert!(
        service
            .get_concepts("http://data.europa.eu/xsp/unknown/unknown", "en")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_get_concept() {
    let service = setup_service().await;

    let concept = service
        .get_concept(PORK_CARCASES, "en")
        .await
        .unwrap()
        .expect("Concept should exist");
    assert_eq!(concept.identifier, "020321000080");
    assert_eq!(concept.notation, "0203 21");
    assert_eq!(concept.alt_label, "Frozen pig carcases");
    assert_eq!(concept.scope_note, "Includes domestic swine only.");

    assert!(service.get_concept("missing", "en").await.unwrap().is_none());
}

#[tokio::test]
async fn test_relations_match_either_endpoint() {
    let service = setup_service().await;

    assert_eq!(service.get_relations(PORK_CARCASES).await.unwrap().len(), 3);
    assert_eq!(service.get_relations(PORK_MEAT).await.unwrap().len(), 2);

    let relations = service.get_relations(HAMS).await.unwrap();
    assert_eq!(relations.len(), 1);
    assert_eq!(relations[0].relation_type, "related");
    assert_eq!(relations[0].source_concept_iri, PORK_CARCASES);
    assert_eq!(relations[0].target_concept_iri, HAMS);

    assert!(service.get_relations("missing").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_full_concept_drops_unknown_schemes() {
    let service = setup_service().await;

    let full = service.get_full_concept(HAMS, "en").await.unwrap();
    assert_eq!(full.concept_schemes, vec![SCHEME.to_string()]);
    assert_eq!(full.relations.len(), 1);

    let json = serde_json::to_value(&full).unwrap();
    assert_eq!(json["iri"], HAMS);
    assert_eq!(json["relations"][0]["type"], "related");

    let missing = service.get_full_concept("missing", "en").await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_collection_members() {
    let service = setup_service().await;

    let collection = service.get_collection(SECTIONS, "de").await.unwrap();
    assert_eq!(collection.collection.pref_label, "Sections");
    assert_eq!(collection.concepts.len(), 1);
    assert_eq!(collection.concepts[0].iri, PORK_CARCASES);
    assert_eq!(collection.collections.len(), 1);
    assert_eq!(collection.collections[0].iri, CHAPTERS);
    assert_eq!(collection.collections[0].pref_label, "Kapitel");

    let empty = service.get_collection(CHAPTERS, "en").await.unwrap();
    assert!(empty.concepts.is_empty());
    assert!(empty.collections.is_empty());

    let missing = service.get_collection("missing", "en").await;
    assert!(matches!(missing, Err(DomainError::NotFound(_))));
}

#[tokio::test]
async fn test_search_concepts() {
    let service = setup_service().await;

    let results = service.search_concepts("SWINE", "en").await.unwrap();
    let iris: Vec<&str> = results.iter().map(|c| c.iri.as_str()).collect();
    assert_eq!(iris, vec![PORK_MEAT, PORK_CARCASES]);

    let results = service.search_concepts("viandes", "fr").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].iri, PORK_MEAT);

    let results = service.search_concepts("CONGELÉES", "fr").await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].iri, PORK_CARCASES);

    // Matches the French label only, so an English search finds nothing
    assert!(service.search_concepts("viandes", "en").await.unwrap().is_empty());
    assert!(service.search_concepts("", "en").await.unwrap().is_empty());
}
