use std::num::IntErrorKind;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};

use super::requests_logging::log_requests;
use super::state::{ServerState, SharedSource};
use crate::error::{QueryError, Result};
use crate::models::{CatalogRecord, ServerConfig};
use crate::services::query::{self, CategoryList, HealthStatus};

#[derive(Serialize)]
struct ServerStats {
    pub name: &'static str,
    pub version: &'static str,
    pub uptime: String,
    pub source: String,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct ListParams {
    skip: Option<usize>,
    limit: Option<usize>,
}

#[derive(Deserialize)]
struct SearchParams {
    title: Option<String>,
    category: Option<String>,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorBody { error: message })).into_response()
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        match &self {
            QueryError::NotFound(_) => error_response(StatusCode::NOT_FOUND, self.to_string()),
            QueryError::DataUnavailable(err) => {
                log::error!("Catalog load failed: {}", err);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to load catalog data".to_string(),
                )
            }
        }
    }
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> Json<ServerStats> {
    Json(ServerStats {
        name: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        uptime: format_uptime(state.start_time.elapsed()),
        source: state.source.location(),
    })
}

async fn health(State(source): State<SharedSource>) -> Json<HealthStatus> {
    Json(query::health(source.as_ref()).await)
}

async fn list_books(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> std::result::Result<Json<Vec<CatalogRecord>>, QueryError> {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(state.config.default_limit);
    Ok(Json(query::list(state.source.as_ref(), skip, limit).await?))
}

async fn search_books(
    State(source): State<SharedSource>,
    Query(params): Query<SearchParams>,
) -> std::result::Result<Json<Vec<CatalogRecord>>, QueryError> {
    let books = query::search(
        source.as_ref(),
        params.title.as_deref(),
        params.category.as_deref(),
    )
    .await?;
    Ok(Json(books))
}

/// Integers too large for `i64` cannot match a record, so they are a 404
/// rather than a malformed path.
async fn get_book(State(source): State<SharedSource>, Path(raw_id): Path<String>) -> Response {
    let id = match raw_id.parse::<i64>() {
        Ok(id) => id,
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            return error_response(StatusCode::NOT_FOUND, format!("No book with id {raw_id}"));
        }
        Err(e) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                format!("Invalid book id '{raw_id}': {e}"),
            );
        }
    };

    match query::get_by_id(source.as_ref(), id).await {
        Ok(book) => Json(book).into_response(),
        Err(e) => e.into_response(),
    }
}

async fn list_categories(
    State(source): State<SharedSource>,
) -> std::result::Result<Json<CategoryList>, QueryError> {
    Ok(Json(query::list_categories(source.as_ref()).await?))
}

pub fn make_app(source: SharedSource, config: ServerConfig) -> Router {
    let log_enabled = config.log_requests;
    let state = ServerState::new(source, config);

    let app = Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/list", get(list_books))
        .route("/search", get(search_books))
        .route("/byId/{id}", get(get_book))
        .route("/categories", get(list_categories))
        .with_state(state);

    if log_enabled {
        app.layer(middleware::from_fn(log_requests))
    } else {
        app
    }
}

pub async fn run_server(source: SharedSource, config: ServerConfig) -> Result<()> {
    let address = config.bind_address();
    let location = source.location();
    let app = make_app(source, config);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    log::info!("Serving {} on http://{}", location, address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
