//! SeaORM implementation of GlossaryRepository

use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, JoinType,
    ModelTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};
use std::collections::HashMap;

use crate::domain::{
    Collection, CollectionMembers, Concept, ConceptScheme, DomainError, GlossaryRepository,
    LocalizedText, ParsedDataset, SemanticRelation,
};
use crate::infrastructure::db;
use crate::models::{collection, concept, concept_scheme, in_collection, in_scheme, semantic_relation};

/// Rows per INSERT / IN (...) statement, below SQLite's bound-parameter limit
const CHUNK_SIZE: usize = 500;

/// SeaORM-based implementation of GlossaryRepository
pub struct SeaOrmGlossaryRepository {
    db: DatabaseConnection,
}

impl SeaOrmGlossaryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl GlossaryRepository for SeaOrmGlossaryRepository {
    async fn reset(&self) -> Result<(), DomainError> {
        db::reset_db(&self.db).await?;
        Ok(())
    }

    async fn save_dataset(&self, dataset: &ParsedDataset) -> Result<(), DomainError> {
        let schemes = dataset
            .concept_schemes
            .iter()
            .map(|s| {
                Ok(concept_scheme::ActiveModel {
                    iri: Set(s.iri.clone()),
                    notation: Set(s.notation.clone()),
                    scope_note: Set(s.scope_note.clone()),
                    pref_labels: Set(encode_labels(&s.pref_labels)?),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let concepts = dataset
            .concepts
            .iter()
            .map(|c| {
                Ok(concept::ActiveModel {
                    iri: Set(c.iri.clone()),
                    identifier: Set(c.identifier.clone()),
                    notation: Set(c.notation.clone()),
                    pref_labels: Set(encode_labels(&c.pref_labels)?),
                    alt_labels: Set(encode_labels(&c.alt_labels)?),
                    scope_notes: Set(encode_labels(&c.scope_notes)?),
                    pref_labels_search: Set(search_text(&c.pref_labels)),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let collections = dataset
            .collections
            .iter()
            .map(|c| {
                Ok(collection::ActiveModel {
                    iri: Set(c.iri.clone()),
                    notation: Set(c.notation.clone()),
                    pref_labels: Set(encode_labels(&c.pref_labels)?),
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        let in_schemes: Vec<in_scheme::ActiveModel> = dataset
            .in_schemes()
            .into_iter()
            .map(|m| in_scheme::ActiveModel {
                scheme_iri: Set(m.scheme_iri),
                member_iri: Set(m.member_iri),
            })
            .collect();

        let in_collections: Vec<in_collection::ActiveModel> = dataset
            .in_collections
            .iter()
            .map(|m| in_collection::ActiveModel {
                collection_iri: Set(m.collection_iri.clone()),
                member_iri: Set(m.member_iri.clone()),
            })
            .collect();

        let relations: Vec<semantic_relation::ActiveModel> = dataset
            .semantic_relations
            .iter()
            .map(|r| semantic_relation::ActiveModel {
                relation_type: Set(r.relation_type.as_str().to_string()),
                source_concept_iri: Set(r.source_concept_iri.clone()),
                target_concept_iri: Set(r.target_concept_iri.clone()),
            })
            .collect();

        // Dropping the transaction without commit rolls everything back
        let txn = self.db.begin().await?;

        for chunk in schemes.chunks(CHUNK_SIZE) {
            concept_scheme::Entity::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in concepts.chunks(CHUNK_SIZE) {
            concept::Entity::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in collections.chunks(CHUNK_SIZE) {
            collection::Entity::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in in_schemes.chunks(CHUNK_SIZE) {
            in_scheme::Entity::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in in_collections.chunks(CHUNK_SIZE) {
            in_collection::Entity::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }
        for chunk in relations.chunks(CHUNK_SIZE) {
            semantic_relation::Entity::insert_many(chunk.to_vec())
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;

        tracing::info!(
            "Saved {} concept schemes, {} concepts, {} collections and {} relations",
            schemes.len(),
            concepts.len(),
            collections.len(),
            relations.len()
        );

        Ok(())
    }

    async fn find_concept_schemes(&self) -> Result<Vec<ConceptScheme>, DomainError> {
        let schemes = concept_scheme::Entity::find()
            .order_by_asc(concept_scheme::Column::Iri)
            .all(&self.db)
            .await?;

        schemes.into_iter().map(scheme_from_model).collect()
    }

    async fn find_concepts_by_scheme(
        &self,
        scheme_iri: &str,
    ) -> Result<Vec<Concept>, DomainError> {
        let concepts = concept::Entity::find()
            .join(JoinType::InnerJoin, in_scheme::Relation::Concept.def().rev())
            .filter(in_scheme::Column::SchemeIri.eq(scheme_iri))
            .order_by_asc(concept::Column::Notation)
            .order_by_asc(concept::Column::Iri)
            .all(&self.db)
            .await?;

        concepts_with_schemes(&self.db, concepts).await
    }

    async fn find_concept(&self, iri: &str) -> Result<Option<Concept>, DomainError> {
        let Some(model) = concept::Entity::find_by_id(iri).one(&self.db).await? else {
            return Ok(None);
        };

        let scheme_iris = model
            .find_related(concept_scheme::Entity)
            .order_by_asc(concept_scheme::Column::Iri)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|s| s.iri)
            .collect();

        concept_from_model(model, scheme_iris).map(Some)
    }

    async fn find_concepts_by_label(&self, term: &str) -> Result<Vec<Concept>, DomainError> {
        let needle = term.to_lowercase();
        let concepts = concept::Entity::find()
            .filter(concept::Column::PrefLabelsSearch.contains(&needle))
            .order_by_asc(concept::Column::Notation)
            .order_by_asc(concept::Column::Iri)
            .all(&self.db)
            .await?;

        concepts_with_schemes(&self.db, concepts).await
    }

    async fn find_relations(
        &self,
        concept_iri: &str,
    ) -> Result<Vec<SemanticRelation>, DomainError> {
        let relations = semantic_relation::Entity::find()
            .filter(
                Condition::any()
                    .add(semantic_relation::Column::SourceConceptIri.eq(concept_iri))
                    .add(semantic_relation::Column::TargetConceptIri.eq(concept_iri)),
            )
            .order_by_asc(semantic_relation::Column::SourceConceptIri)
            .order_by_asc(semantic_relation::Column::TargetConceptIri)
            .all(&self.db)
            .await?;

        relations
            .into_iter()
            .map(|r| {
                Ok(SemanticRelation {
                    relation_type: r.relation_type.parse()?,
                    source_concept_iri: r.source_concept_iri,
                    target_concept_iri: r.target_concept_iri,
                })
            })
            .collect()
    }

    async fn find_collection(&self, iri: &str) -> Result<Option<Collection>, DomainError> {
        let Some(model) = collection::Entity::find_by_id(iri).one(&self.db).await? else {
            return Ok(None);
        };

        let scheme_iris = in_scheme::Entity::find()
            .filter(in_scheme::Column::MemberIri.eq(iri))
            .order_by_asc(in_scheme::Column::SchemeIri)
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.scheme_iri)
            .collect();

        collection_from_model(model, scheme_iris).map(Some)
    }

    async fn find_collection_members(
        &self,
        collection_iri: &str,
    ) -> Result<CollectionMembers, DomainError> {
        let member_iris: Vec<String> = in_collection::Entity::find()
            .filter(in_collection::Column::CollectionIri.eq(collection_iri))
            .all(&self.db)
            .await?
            .into_iter()
            .map(|m| m.member_iri)
            .collect();

        // Members pointing at neither a concept nor a collection are skipped
        let mut concept_models = Vec::new();
        let mut collection_models = Vec::new();
        for chunk in member_iris.chunks(CHUNK_SIZE) {
            concept_models.extend(
                concept::Entity::find()
                    .filter(concept::Column::Iri.is_in(chunk.to_vec()))
                    .all(&self.db)
                    .await?,
            );
            collection_models.extend(
                collection::Entity::find()
                    .filter(collection::Column::Iri.is_in(chunk.to_vec()))
                    .all(&self.db)
                    .await?,
            );
        }

        // Chunks are queried separately, so order the merged rows
        concept_models.sort_by(|a, b| (&a.notation, &a.iri).cmp(&(&b.notation, &b.iri)));
        collection_models.sort_by(|a, b| (&a.notation, &a.iri).cmp(&(&b.notation, &b.iri)));

        let concepts = concepts_with_schemes(&self.db, concept_models).await?;

        let collection_iris: Vec<String> = collection_models.iter().map(|c| c.iri.clone()).collect();
        let mut memberships = scheme_iris_by_member(&self.db, &collection_iris).await?;
        let collections = collection_models
            .into_iter()
            .map(|model| {
                let scheme_iris = memberships.remove(&model.iri).unwrap_or_default();
                collection_from_model(model, scheme_iris)
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(CollectionMembers {
            concepts,
            collections,
        })
    }
}

fn encode_labels(labels: &LocalizedText) -> Result<String, DomainError> {
    Ok(serde_json::to_string(labels)?)
}

/// Lowercased label values, one per line, for `LIKE` matching
fn search_text(labels: &LocalizedText) -> String {
    labels
        .values()
        .map(|label| label.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n")
}

fn decode_labels(raw: &str) -> Result<LocalizedText, DomainError> {
    Ok(serde_json::from_str(raw)?)
}

fn scheme_from_model(model: concept_scheme::Model) -> Result<ConceptScheme, DomainError> {
    Ok(ConceptScheme {
        pref_labels: decode_labels(&model.pref_labels)?,
        iri: model.iri,
        notation: model.notation,
        scope_note: model.scope_note,
    })
}

fn concept_from_model(
    model: concept::Model,
    scheme_iris: Vec<String>,
) -> Result<Concept, DomainError> {
    Ok(Concept {
        pref_labels: decode_labels(&model.pref_labels)?,
        alt_labels: decode_labels(&model.alt_labels)?,
        scope_notes: decode_labels(&model.scope_notes)?,
        iri: model.iri,
        identifier: model.identifier,
        notation: model.notation,
        scheme_iris,
    })
}

fn collection_from_model(
    model: collection::Model,
    scheme_iris: Vec<String>,
) -> Result<Collection, DomainError> {
    Ok(Collection {
        pref_labels: decode_labels(&model.pref_labels)?,
        iri: model.iri,
        notation: model.notation,
        scheme_iris,
    })
}

/// member IRI -> IRIs of the schemes it belongs to
async fn scheme_iris_by_member<C: ConnectionTrait>(
    db: &C,
    member_iris: &[String],
) -> Result<HashMap<String, Vec<String>>, DomainError> {
    let mut memberships: HashMap<String, Vec<String>> = HashMap::new();

    for chunk in member_iris.chunks(CHUNK_SIZE) {
        let rows = in_scheme::Entity::find()
            .filter(in_scheme::Column::MemberIri.is_in(chunk.to_vec()))
            .order_by_asc(in_scheme::Column::SchemeIri)
            .all(db)
            .await?;

        for row in rows {
            memberships
                .entry(row.member_iri)
                .or_default()
                .push(row.scheme_iri);
        }
    }

    Ok(memberships)
}

async fn concepts_with_schemes<C: ConnectionTrait>(
    db: &C,
    models: Vec<concept::Model>,
) -> Result<Vec<Concept>, DomainError> {
    let iris: Vec<String> = models.iter().map(|m| m.iri.clone()).collect();
    let mut memberships = scheme_iris_by_member(db, &iris).await?;

    models
        .into_iter()
        .map(|model| {
            let scheme_iris = memberships.remove(&model.iri).unwrap_or_default();
            concept_from_model(model, scheme_iris)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InCollection, SemanticRelationType};
    use crate::infrastructure::db::init_db;
    use crate::services::GlossaryService;
    use std::sync::Arc;

    async fn setup_repository() -> SeaOrmGlossaryRepository {
        let db = init_db("sqlite::memory:").await.expect("Failed to init db");
        SeaOrmGlossaryRepository::new(db)
    }

    fn scheme(iri: &str) -> ConceptScheme {
        ConceptScheme {
            iri: iri.to_string(),
            ..Default::default()
        }
    }

    fn concept(iri: &str, notation: &str, labels: &[(&str, &str)], scheme_iri: &str) -> Concept {
        Concept {
            iri: iri.to_string(),
            notation: notation.to_string(),
            pref_labels: labels
                .iter()
                .map(|(lang, text)| (lang.to_string(), text.to_string()))
                .collect(),
            scheme_iris: vec![scheme_iri.to_string()],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_dataset_rolls_back_on_dangling_relation() {
        let repository = setup_repository().await;
        repository
            .save_dataset(&ParsedDataset {
                concept_schemes: vec![scheme("s")],
                concepts: vec![concept("c", "01", &[("en", "First")], "s")],
                ..Default::default()
            })
            .await
            .expect("Failed to save first dataset");

        let dangling = ParsedDataset {
            concept_schemes: vec![scheme("s2")],
            concepts: vec![concept("c2", "02", &[("en", "Second")], "s2")],
            semantic_relations: vec![SemanticRelation {
                relation_type: SemanticRelationType::Broader,
                source_concept_iri: "c2".to_string(),
                target_concept_iri: "not-in-document".to_string(),
            }],
            ..Default::default()
        };
        let result = repository.save_dataset(&dangling).await;
        assert!(matches!(result, Err(DomainError::Database(_))));

        let schemes: Vec<String> = repository
            .find_concept_schemes()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.iri)
            .collect();
        assert_eq!(schemes, vec!["s".to_string()]);
        assert!(repository.find_concept("c2").await.unwrap().is_none());
        assert!(repository.find_concepts_by_scheme("s2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_label_search_folds_unicode_case_and_keeps_quotes() {
        let repository = setup_repository().await;
        repository
            .save_dataset(&ParsedDataset {
                concept_schemes: vec![scheme("s")],
                concepts: vec![
                    concept(
                        "carcases",
                        "01",
                        &[("en", "Frozen carcases"), ("fr", "Carcasses congelées")],
                        "s",
                    ),
                    concept("tubes", "02", &[("en", r#"Tubes of 12" diameter"#)], "s"),
                    concept("paths", "03", &[("en", r"Paths with a \ separator")], "s"),
                ],
                ..Default::default()
            })
            .await
            .unwrap();

        let found = repository.find_concepts_by_label("CONGELÉES").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].iri, "carcases");

        let found = repository.find_concepts_by_label(r#"12" DIAMETER"#).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].iri, "tubes");

        let found = repository.find_concepts_by_label(r"a \ sep").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].iri, "paths");

        // Stored JSON syntax is not searchable text
        assert!(repository.find_concepts_by_label(r#""en":"#).await.unwrap().is_empty());

        let service = GlossaryService::new(Arc::new(repository));
        let results = service.search_concepts("CONGELÉES", "fr").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].pref_label, "Carcasses congelées");
        let results = service.search_concepts(r#"12" diameter"#, "en").await.unwrap();
        assert_eq!(results.len(), 1);
    }

    #[tokio::test]
    async fn test_collection_members_sorted_across_chunks() {
        let repository = setup_repository().await;

        // Notations run backwards, so each chunk alone is sorted differently from the whole
        let count = CHUNK_SIZE + 20;
        let concepts: Vec<Concept> = (0..count)
            .map(|i| {
                concept(
                    &format!("c{:04}", i),
                    &format!("{:04}", count - i),
                    &[("en", "Member")],
                    "s",
                )
            })
            .collect();
        let in_collections = concepts
            .iter()
            .map(|c| InCollection {
                collection_iri: "big".to_string(),
                member_iri: c.iri.clone(),
            })
            .collect();

        repository
            .save_dataset(&ParsedDataset {
                concept_schemes: vec![scheme("s")],
                concepts,
                collections: vec![Collection {
                    iri: "big".to_string(),
                    ..Default::default()
                }],
                in_collections,
                ..Default::default()
            })
            .await
            .unwrap();

        let members = repository.find_collection_members("big").await.unwrap();
        assert_eq!(members.concepts.len(), count);
        assert!(members.collections.is_empty());

        let notations: Vec<&str> = members.concepts.iter().map(|c| c.notation.as_str()).collect();
        let mut sorted = notations.clone();
        sorted.sort();
        assert_eq!(notations, sorted);
        assert_eq!(members.concepts[0].iri, format!("c{:04}", count - 1));
    }
}
