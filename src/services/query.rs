// src/services/query.rs

//! Catalog query engine.
//!
//! Every operation performs a fresh load through the given [`RecordSource`];
//! there is no cache, so edits to the source file show up on the next call.

use serde::Serialize;

use crate::error::QueryError;
use crate::models::CatalogRecord;
use crate::storage::RecordSource;

/// Result alias for query operations.
pub type QueryResult<T> = std::result::Result<T, QueryError>;

/// Health probe response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: &'static str,
    pub message: String,
}

/// Distinct category listing response.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CategoryList {
    pub categories: Vec<String>,
}

/// Contiguous page of the catalog starting at `skip`, at most `limit` long.
pub async fn list(source: &dyn RecordSource, skip: usize, limit: usize) -> QueryResult<Vec<CatalogRecord>> {
    let records = source.load().await?;
    Ok(records.into_iter().skip(skip).take(limit).collect())
}

/// Filter by case-insensitive substring on title and/or category.
///
/// A missing or empty filter imposes no constraint. Records whose field is
/// null never match a filter on that field.
pub async fn search(
    source: &dyn RecordSource,
    title: Option<&str>,
    category: Option<&str>,
) -> QueryResult<Vec<CatalogRecord>> {
    let title = normalize_filter(title);
    let category = normalize_filter(category);

    let records = source.load().await?;
    Ok(records
        .into_iter()
        .filter(|record| matches_filter(record.title(), title.as_deref()))
        .filter(|record| matches_filter(record.category(), category.as_deref()))
        .collect())
}

/// Look up the record whose derived id equals `id`.
pub async fn get_by_id(source: &dyn RecordSource, id: i64) -> QueryResult<CatalogRecord> {
    let records = source.load().await?;
    let index = usize::try_from(id)
        .ok()
        .and_then(|id| id.checked_sub(1))
        .ok_or(QueryError::NotFound(id))?;

    records
        .into_iter()
        .nth(index)
        .ok_or(QueryError::NotFound(id))
}

/// Distinct non-null categories in first-occurrence order.
pub async fn list_categories(source: &dyn RecordSource) -> QueryResult<CategoryList> {
    let records = source.load().await?;
    Ok(CategoryList {
        categories: distinct_categories(&records),
    })
}

/// Distinct non-null categories of already loaded records.
pub fn distinct_categories(records: &[CatalogRecord]) -> Vec<String> {
    let mut categories: Vec<String> = Vec::new();
    for category in records.iter().filter_map(|r| r.category()) {
        if !categories.iter().any(|seen| seen == category) {
            categories.push(category.to_string());
        }
    }
    categories
}

/// Report whether the source currently loads.
pub async fn health(source: &dyn RecordSource) -> HealthStatus {
    match source.load().await {
        Ok(records) => HealthStatus {
            status: "ok",
            message: format!("Serving {} books", records.len()),
        },
        Err(e) => {
            log::error!("Health check failed to load {}: {}", source.location(), e);
            HealthStatus {
                status: "error",
                message: "Failed to load catalog data".to_string(),
            }
        }
    }
}

fn normalize_filter(filter: Option<&str>) -> Option<String> {
    filter
        .filter(|f| !f.is_empty())
        .map(|f| f.to_lowercase())
}

fn matches_filter(value: Option<&str>, needle: Option<&str>) -> bool {
    match (needle, value) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(needle), Some(value)) => value.to_lowercase().contains(needle),
    }
}
