use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "semantic_relations")]
pub struct Model {
    pub relation_type: String, // broader, narrower, related, broaderTransitive, narrowerTransitive
    #[sea_orm(primary_key, auto_increment = false)]
    pub source_concept_iri: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub target_concept_iri: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::concept::Entity",
        from = "Column::SourceConceptIri",
        to = "super::concept::Column::Iri",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    SourceConcept,
    #[sea_orm(
        belongs_to = "super::concept::Entity",
        from = "Column::TargetConceptIri",
        to = "super::concept::Column::Iri",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    TargetConcept,
}

impl ActiveModelBehavior for ActiveModel {}
