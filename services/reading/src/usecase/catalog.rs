use crate::domain::repository::CatalogPort;
use crate::domain::types::{CatalogVolume, DEFAULT_MAX_RESULTS, MAX_RESULTS_RANGE};
use crate::error::ReadingServiceError;

// ── SearchCatalog ────────────────────────────────────────────────────────────

pub struct SearchCatalogUseCase<C: CatalogPort> {
    pub catalog: C,
}

impl<C: CatalogPort> SearchCatalogUseCase<C> {
    pub async fn execute(
        &self,
        query: &str,
        max_results: Option<u32>,
    ) -> Result<Vec<CatalogVolume>, ReadingServiceError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(ReadingServiceError::Validation("q is required".to_owned()));
        }
        let max_results = max_results.unwrap_or(DEFAULT_MAX_RESULTS);
        if !MAX_RESULTS_RANGE.contains(&max_results) {
            return Err(ReadingServiceError::Validation(format!(
                "maxResults must be between {} and {}",
                MAX_RESULTS_RANGE.start(),
                MAX_RESULTS_RANGE.end()
            )));
        }
        self.catalog.search(query, max_results).await
    }
}

// ── GetCatalogVolume ─────────────────────────────────────────────────────────

pub struct GetCatalogVolumeUseCase<C: CatalogPort> {
    pub catalog: C,
}

impl<C: CatalogPort> GetCatalogVolumeUseCase<C> {
    pub async fn execute(&self, google_book_id: &str) -> Result<CatalogVolume, ReadingServiceError> {
        self.catalog
            .get(google_book_id)
            .await?
            .ok_or_else(|| ReadingServiceError::BookNotFound(google_book_id.to_owned()))
    }
}
