// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Artpath: gamified drawing lessons with AI skill assessment
//!
//! This crate provides the backend API that tracks learner progress through
//! learning paths (XP, levels, streaks) and assigns paths from a
//! vision-model assessment of a drawing.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::FirestoreDb;
use services::{AssessmentService, PathCatalog};
use std::sync::Arc;
use time_utils::Clock;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: FirestoreDb,
    pub catalog: PathCatalog,
    pub assessment: AssessmentService,
    pub clock: Arc<dyn Clock>,
}
