use axum::{
    Json,
    extract::{Path, Query, State},
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use crate::domain::types::CatalogVolume;
use crate::error::ReadingServiceError;
use crate::state::AppState;
use crate::usecase::catalog::{GetCatalogVolumeUseCase, SearchCatalogUseCase};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogVolumeResponse {
    pub google_book_id: String,
    pub title: String,
    pub authors: Option<String>,
    pub thumbnail_url: Option<String>,
    pub description: Option<String>,
    pub publisher: Option<String>,
    pub published_date: Option<String>,
    pub page_count: Option<u32>,
}

impl From<CatalogVolume> for CatalogVolumeResponse {
    fn from(volume: CatalogVolume) -> Self {
        Self {
            google_book_id: volume.google_book_id,
            title: volume.title,
            authors: volume.authors,
            thumbnail_url: volume.thumbnail_url,
            description: volume.description,
            publisher: volume.publisher,
            published_date: volume.published_date,
            page_count: volume.page_count,
        }
    }
}

// ── GET /google-books/search ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
    pub max_results: Option<u32>,
}

pub async fn search_google_books(
    State(state): State<AppState>,
    WithRejection(Query(query), _): WithRejection<Query<SearchQuery>, ReadingServiceError>,
) -> Result<Json<Vec<CatalogVolumeResponse>>, ReadingServiceError> {
    let usecase = SearchCatalogUseCase {
        catalog: state.catalog.clone(),
    };
    let volumes = usecase.execute(&query.q, query.max_results).await?;
    Ok(Json(volumes.into_iter().map(Into::into).collect()))
}

// ── GET /google-books/{id} ───────────────────────────────────────────────────

pub async fn get_google_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CatalogVolumeResponse>, ReadingServiceError> {
    let usecase = GetCatalogVolumeUseCase {
        catalog: state.catalog.clone(),
    };
    let volume = usecase.execute(&id).await?;
    Ok(Json(volume.into()))
}
