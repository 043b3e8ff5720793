use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "collections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub iri: String,
    pub notation: String,
    pub pref_labels: String, // JSON object
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::in_collection::Entity")]
    InCollection,
}

impl Related<super::in_collection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::InCollection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
