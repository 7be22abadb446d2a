use crate::config::AppConfig;
use crate::data;
use crate::processing;
use crate::types::{DashboardViews, Record};
use anyhow::Result;
use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub struct AppState {
    pub records: Vec<Record>,
    pub years: Vec<i32>,
}

#[derive(Deserialize)]
pub struct ViewParams {
    year: Option<i32>,
}

#[derive(Serialize)]
pub struct MetaResponse {
    columns: Vec<&'static str>,
    years: Vec<i32>,
    default_year: Option<i32>,
}

pub async fn start_server(config: AppConfig, records: Vec<Record>) -> Result<()> {
    let years = processing::distinct_years(&records);
    let state = Arc::new(AppState { records, years });

    let port = config.server.port;
    let addr = SocketAddr::from(([127, 0, 0, 1], port));

    println!("Starting server on http://{}", addr);

    let app = Router::new()
        .route("/api/meta", get(meta_handler))
        .route("/api/records", get(records_handler))
        .route("/api/views", get(views_handler))
        .fallback_service(ServeDir::new("assets"))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn meta_handler(State(state): State<Arc<AppState>>) -> Json<MetaResponse> {
    Json(MetaResponse {
        columns: data::COLUMNS.to_vec(),
        years: state.years.clone(),
        default_year: state.years.first().copied(),
    })
}

async fn records_handler(State(state): State<Arc<AppState>>) -> Json<Vec<Record>> {
    Json(state.records.clone())
}

async fn views_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ViewParams>,
) -> Json<DashboardViews> {
    // Fall back to the earliest year, matching the slider's default.
    let year = params
        .year
        .or_else(|| state.years.first().copied())
        .unwrap_or(0);

    Json(processing::render_views(&state.records, year))
}
