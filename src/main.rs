// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Artpath API Server
//!
//! Serves learner progress (XP, levels, streaks, path completion) and
//! drawing-based skill assessment.

use artpath::{
    config::{Config, ProgressStoreKind},
    db::FirestoreDb,
    services::{AssessmentService, PathCatalog, VisionClient},
    time_utils::SystemClock,
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging for GCP
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting Artpath API");

    // Initialize progress store
    let db = match config.progress_store {
        ProgressStoreKind::Firestore => FirestoreDb::new(&config.gcp_project_id)
            .await
            .expect("Failed to connect to Firestore"),
        ProgressStoreKind::Memory => {
            tracing::warn!("Using in-memory progress store; progress is lost on restart");
            FirestoreDb::new_in_memory()
        }
    };

    // Load learning path catalog
    let catalog = match &config.catalog_path {
        Some(path) => {
            tracing::info!(path = %path, "Loading learning path catalog");
            PathCatalog::load_from_file(path).expect("Failed to load learning path catalog")
        }
        None => PathCatalog::builtin(),
    };
    tracing::info!(count = catalog.paths().len(), "Learning paths loaded");

    if config.vision_api_key.is_none() {
        tracing::warn!("VISION_API_KEY not set; assessments will use the fallback analysis");
    }
    let vision = VisionClient::new(
        config.vision_api_url.clone(),
        config.vision_api_key.clone(),
        config.vision_model.clone(),
    );

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        catalog,
        assessment: AssessmentService::new(vision),
        clock: Arc::new(SystemClock),
    });

    // Build router
    let app = artpath::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging (GCP-compliant).
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("artpath=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
