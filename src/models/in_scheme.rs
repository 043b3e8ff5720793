use sea_orm::entity::prelude::*;

/// Scheme membership of a concept or a collection
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "in_scheme")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub scheme_iri: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub member_iri: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::concept_scheme::Entity",
        from = "Column::SchemeIri",
        to = "super::concept_scheme::Column::Iri",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    ConceptScheme,
    #[sea_orm(
        belongs_to = "super::concept::Entity",
        from = "Column::MemberIri",
        to = "super::concept::Column::Iri",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Concept,
}

impl Related<super::concept_scheme::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ConceptScheme.def()
    }
}

impl Related<super::concept::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Concept.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
