use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "concepts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub iri: String,
    pub identifier: String,
    pub notation: String,
    pub pref_labels: String, // JSON object
    pub alt_labels: String,  // JSON object
    pub scope_notes: String, // JSON object
    /// Lowercased preferred labels of every language, one per line
    pub pref_labels_search: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl Related<super::concept_scheme::Entity> for Entity {
    fn to() -> RelationDef {
        super::in_scheme::Relation::ConceptScheme.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::in_scheme::Relation::Concept.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
