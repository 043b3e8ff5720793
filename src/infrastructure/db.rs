use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbErr, Statement};

/// Tables in dependency order; dropped in reverse
const TABLES: [&str; 6] = [
    "concept_schemes",
    "concepts",
    "collections",
    "in_scheme",
    "in_collection",
    "semantic_relations",
];

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    // Run migrations manually (simple SQL)
    run_migrations(&db).await?;

    Ok(db)
}

/// Drop every glossary table and create them again, empty
pub async fn reset_db<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    for table in TABLES.iter().rev() {
        db.execute(Statement::from_string(
            db.get_database_backend(),
            format!("DROP TABLE IF EXISTS {}", table),
        ))
        .await?;
    }

    run_migrations(db).await
}

async fn run_migrations<C: ConnectionTrait>(db: &C) -> Result<(), DbErr> {
    // Label columns hold JSON objects (language code -> text)
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS concept_schemes (
            iri TEXT PRIMARY KEY NOT NULL,
            notation TEXT NOT NULL DEFAULT '',
            scope_note TEXT NOT NULL DEFAULT '',
            pref_labels TEXT NOT NULL DEFAULT '{}'
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS concepts (
            iri TEXT PRIMARY KEY NOT NULL,
            identifier TEXT NOT NULL DEFAULT '',
            notation TEXT NOT NULL DEFAULT '',
            pref_labels TEXT NOT NULL DEFAULT '{}',
            alt_labels TEXT NOT NULL DEFAULT '{}',
            scope_notes TEXT NOT NULL DEFAULT '{}',
            pref_labels_search TEXT NOT NULL DEFAULT ''
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS collections (
            iri TEXT PRIMARY KEY NOT NULL,
            notation TEXT NOT NULL DEFAULT '',
            pref_labels TEXT NOT NULL DEFAULT '{}'
        )
        "#
        .to_owned(),
    ))
    .await?;

    // member_iri points at either a concept or a collection
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS in_scheme (
            scheme_iri TEXT NOT NULL,
            member_iri TEXT NOT NULL,
            PRIMARY KEY (scheme_iri, member_iri),
            FOREIGN KEY (scheme_iri) REFERENCES concept_schemes(iri) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS in_collection (
            collection_iri TEXT NOT NULL,
            member_iri TEXT NOT NULL,
            PRIMARY KEY (collection_iri, member_iri),
            FOREIGN KEY (collection_iri) REFERENCES collections(iri) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS semantic_relations (
            relation_type TEXT NOT NULL,
            source_concept_iri TEXT NOT NULL,
            target_concept_iri TEXT NOT NULL,
            PRIMARY KEY (source_concept_iri, target_concept_iri),
            FOREIGN KEY (source_concept_iri) REFERENCES concepts(iri) ON DELETE CASCADE,
            FOREIGN KEY (target_concept_iri) REFERENCES concepts(iri) ON DELETE CASCADE
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_semantic_relations_target ON semantic_relations(target_concept_iri)"
            .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "CREATE INDEX IF NOT EXISTS idx_in_scheme_member ON in_scheme(member_iri)".to_owned(),
    ))
    .await?;

    Ok(())
}
