//! Ingest Service - best-effort loading of SKOS datasets into the database
//!
//! Every run starts from empty tables. A dataset that cannot be fetched,
//! parsed or saved is reported in the failed list and the run continues
//! with the next one.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::{DomainError, GlossaryRepository};
use crate::modules::integrations::eurostat::{DatasetFetcher, DatasetSource};
use crate::modules::skos::parse_dataset;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedDataset {
    pub dataset: String,
    pub dataset_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedDataset {
    pub dataset: String,
    pub dataset_url: String,
    pub error: String,
}

/// Outcome of one ingestion run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitDatasetsReport {
    pub saved_datasets: Vec<SavedDataset>,
    pub failed_datasets: Vec<FailedDataset>,
}

/// Recreate the glossary tables and load every dataset in `sources`.
///
/// Downloads are cached in `data_dir`; a cached file is reused unless
/// `reload` is set. Only failing to reset the database or to create
/// `data_dir` aborts the run.
pub async fn init_datasets(
    repository: &dyn GlossaryRepository,
    fetcher: &dyn DatasetFetcher,
    data_dir: &Path,
    sources: &[DatasetSource],
    reload: bool,
) -> Result<InitDatasetsReport, DomainError> {
    tracing::info!(
        "Initializing {} datasets in {:?} (reload={})",
        sources.len(),
        data_dir,
        reload
    );

    repository.reset().await?;
    tokio::fs::create_dir_all(data_dir).await?;

    let mut report = InitDatasetsReport::default();

    for source in sources {
        match ingest_dataset(repository, fetcher, data_dir, source, reload).await {
            Ok(()) => {
                tracing::info!("Dataset {} saved", source.file_name);
                report.saved_datasets.push(SavedDataset {
                    dataset: source.file_name.clone(),
                    dataset_url: source.url.clone(),
                });
            }
            Err(e) => {
                tracing::error!("Dataset {} failed: {}", source.file_name, e);
                report.failed_datasets.push(FailedDataset {
                    dataset: source.file_name.clone(),
                    dataset_url: source.url.clone(),
                    error: e.to_string(),
                });
            }
        }
    }

    Ok(report)
}

async fn ingest_dataset(
    repository: &dyn GlossaryRepository,
    fetcher: &dyn DatasetFetcher,
    data_dir: &Path,
    source: &DatasetSource,
    reload: bool,
) -> Result<(), DomainError> {
    let dataset_path = data_dir.join(&source.file_name);

    let dataset = if !reload && tokio::fs::try_exists(&dataset_path).await? {
        tracing::debug!("Using cached {:?}", dataset_path);
        parse_dataset(&tokio::fs::read(&dataset_path).await?)?
    } else {
        let xml = fetcher.fetch(&source.url).await?;
        // Only documents that parse are cached
        let dataset = parse_dataset(&xml)?;
        tokio::fs::write(&dataset_path, &xml).await?;
        dataset
    };

    repository.save_dataset(&dataset).await
}
