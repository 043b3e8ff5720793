//! Application state containing the repository and shared resources

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::{DomainError, GlossaryRepository};
use crate::infrastructure::SeaOrmGlossaryRepository;
use crate::infrastructure::config::Config;
use crate::modules::integrations::eurostat::{DatasetFetcher, HttpDatasetFetcher};
use crate::services::GlossaryService;

/// Everything a command needs, built once at startup
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Glossary repository
    pub glossary_repo: Arc<dyn GlossaryRepository>,
    /// Downloader for remote datasets
    pub fetcher: Arc<dyn DatasetFetcher>,
}

impl AppState {
    /// Create a new AppState with the repository and HTTP fetcher initialized
    pub fn new(db: DatabaseConnection, config: Config) -> Result<Self, DomainError> {
        let glossary_repo = Arc::new(SeaOrmGlossaryRepository::new(db));
        let fetcher = Arc::new(HttpDatasetFetcher::new(config.http_timeout)?);

        Ok(Self {
            config,
            glossary_repo,
            fetcher,
        })
    }

    pub fn glossary_service(&self) -> GlossaryService {
        GlossaryService::new(self.glossary_repo.clone())
    }
}
