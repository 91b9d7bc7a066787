// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod assessment;
pub mod catalog;
pub mod progress;
pub mod vision;

pub use assessment::AssessmentService;
pub use catalog::{CatalogError, PathCatalog};
pub use vision::VisionClient;
