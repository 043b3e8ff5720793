use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use dds_glossary::domain::{DEFAULT_LANGUAGE, DomainError};
use dds_glossary::eurostat::default_datasets;
use dds_glossary::infrastructure::AppState;
use dds_glossary::services::{init_datasets, version};
use dds_glossary::{config, db};

const USAGE: &str = "Usage: dds-glossary [--lang <code>] <command>

Commands:
  init [--reload]        Download and load every dataset
  schemes                List concept schemes
  concepts <scheme-iri>  List the concepts of a scheme
  concept <iri>          Show a concept with its schemes and relations
  relations <iri>        List relations touching a concept
  collection <iri>       Show a collection and its members
  search <term>          Search concepts by preferred label
  version                Print the version";

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "dds_glossary=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    dotenvy::dotenv().ok();

    let mut args: Vec<String> = std::env::args().skip(1).collect();

    let mut lang = DEFAULT_LANGUAGE.to_string();
    if let Some(pos) = args.iter().position(|arg| arg == "--lang") {
        match args.get(pos + 1) {
            Some(val) => lang = val.clone(),
            None => exit_with_usage(),
        }
        args.remove(pos + 1);
        args.remove(pos);
    }

    let reload = match args.iter().position(|arg| arg == "--reload") {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    };

    // Unknown commands and missing arguments fail before any configuration is read
    let Some(command) = Command::parse(&args) else {
        exit_with_usage();
    };

    if command == Command::Version {
        println!("{}", version());
        return;
    }

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    // Initialize database
    let db = match db::init_db(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    let state = match AppState::new(db, config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to build application state: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&state, &command, &lang, reload).await {
        tracing::error!("{:?} failed: {}", command, e);
        std::process::exit(1);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Init,
    Schemes,
    Concepts(String),
    Concept(String),
    Relations(String),
    Collection(String),
    Search(String),
    Version,
}

impl Command {
    /// `args` holds the command name and its argument, flags already removed
    fn parse(args: &[String]) -> Option<Self> {
        let argument = || args.get(1).cloned();

        match args.first()?.as_str() {
            "init" => Some(Command::Init),
            "schemes" => Some(Command::Schemes),
            "concepts" => argument().map(Command::Concepts),
            "concept" => argument().map(Command::Concept),
            "relations" => argument().map(Command::Relations),
            "collection" => argument().map(Command::Collection),
            "search" => argument().map(Command::Search),
            "version" => Some(Command::Version),
            _ => None,
        }
    }
}

async fn run(
    state: &AppState,
    command: &Command,
    lang: &str,
    reload: bool,
) -> Result<(), DomainError> {
    let service = state.glossary_service();

    match command {
        Command::Init => {
            let report = init_datasets(
                state.glossary_repo.as_ref(),
                state.fetcher.as_ref(),
                &state.config.data_dir,
                &default_datasets(),
                reload,
            )
            .await?;
            print_json(&report)
        }
        Command::Schemes => print_json(&service.get_concept_schemes(lang).await?),
        Command::Concepts(iri) => print_json(&service.get_concepts(iri, lang).await?),
        Command::Concept(iri) => print_json(&service.get_full_concept(iri, lang).await?),
        Command::Relations(iri) => print_json(&service.get_relations(iri).await?),
        Command::Collection(iri) => print_json(&service.get_collection(iri, lang).await?),
        Command::Search(term) => print_json(&service.search_concepts(term, lang).await?),
        Command::Version => {
            println!("{}", version());
            Ok(())
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), DomainError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn exit_with_usage() -> ! {
    eprintln!("{}", USAGE);
    std::process::exit(2);
}
