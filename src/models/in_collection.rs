use sea_orm::entity::prelude::*;

/// Membership of a concept or a nested collection in a collection
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "in_collection")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection_iri: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_iri: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::collection::Entity",
        from = "Column::CollectionIri",
        to = "super::collection::Column::Iri",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Collection,
}

impl Related<super::collection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Collection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
