//! Eurostat classification datasets published on the EU publications portal
//!
//! Each dataset is a SKOS core RDF/XML distribution downloaded with a plain
//! HTTP GET.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::DomainError;

pub const DISTRIBUTION_BASE_URL: &str = "http://publications.europa.eu/resource/distribution/";

/// Local file name and download URL of one dataset
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSource {
    pub file_name: String,
    pub url: String,
}

impl DatasetSource {
    pub fn new(file_name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            url: url.into(),
        }
    }
}

/// The classifications loaded by `init`
pub fn default_datasets() -> Vec<DatasetSource> {
    [
        (
            "ESTAT-CN2024.rdf",
            "combined-nomenclature-2024/20240425-0/rdf/skos_core/ESTAT-CN2024.rdf",
        ),
        (
            "ESTAT-LoW2015.rdf",
            "low2015/20240425-0/rdf/skos_core/ESTAT-LoW2015.rdf",
        ),
        (
            "ESTAT-NACE2.1.rdf",
            "nace2.1/20240425-0/rdf/skos_core/ESTAT-NACE2.1.rdf",
        ),
        (
            "ESTAT-ICST-COM.rdf",
            "icst-com/20240425-0/rdf/skos_core/ESTAT-ICST-COM.rdf",
        ),
        (
            "ESTAT-PRODCOM2023.rdf",
            "prodcom2023/20240425-0/rdf/skos_core/ESTAT-PRODCOM2023.rdf",
        ),
    ]
    .into_iter()
    .map(|(file_name, path)| {
        DatasetSource::new(file_name, format!("{}{}", DISTRIBUTION_BASE_URL, path))
    })
    .collect()
}

/// Source of raw dataset documents
#[async_trait]
pub trait DatasetFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError>;
}

/// Downloads datasets over HTTP with reqwest
pub struct HttpDatasetFetcher {
    client: reqwest::Client,
}

impl HttpDatasetFetcher {
    pub fn new(timeout: Duration) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl DatasetFetcher for HttpDatasetFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, DomainError> {
        tracing::debug!("Downloading dataset from {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(DomainError::External(format!(
                "{} returned error status: {}",
                url,
                response.status()
            )));
        }

        Ok(response.bytes().await?.to_vec())
    }
}
