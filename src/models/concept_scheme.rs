use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "concept_schemes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub iri: String,
    pub notation: String,
    pub scope_note: String,
    pub pref_labels: String, // JSON object: language -> label
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::in_scheme::Entity")]
    InScheme,
}

impl Related<super::in_scheme::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InScheme.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
