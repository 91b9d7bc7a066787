// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod assessment;
pub mod catalog;
pub mod progress;

pub use assessment::{AssessmentResult, LearningPathId, SkillAnalysis, SkillLevel};
pub use catalog::{CatalogPath, Lesson, LessonBody};
pub use progress::{LessonAction, LessonEvent, LessonProgress, PathProgress, ProgressRecord};
