// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Learning path catalog loading and lookup service.

use crate::models::catalog::{CatalogPath, LessonBody};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Read-only catalog of learning paths, loaded once at startup.
#[derive(Default, Clone)]
pub struct PathCatalog {
    paths: Vec<CatalogPath>,
}

impl PathCatalog {
    /// Load paths from a JSON file containing an array of paths.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let json_data =
            fs::read_to_string(path.as_ref()).map_err(|e| CatalogError::IoError(e.to_string()))?;
        Self::load_from_json(&json_data)
    }

    /// Load paths from a JSON string containing an array of paths.
    pub fn load_from_json(json_data: &str) -> Result<Self, CatalogError> {
        let paths: Vec<CatalogPath> = serde_json::from_str(json_data)
            .map_err(|e| CatalogError::ParseError(e.to_string()))?;
        Self::from_paths(paths)
    }

    /// Build a catalog from already parsed paths, checking their consistency.
    pub fn from_paths(paths: Vec<CatalogPath>) -> Result<Self, CatalogError> {
        let mut path_ids = HashSet::new();

        for path in &paths {
            if !path_ids.insert(path.id.as_str()) {
                return Err(CatalogError::DuplicatePath(path.id.clone()));
            }

            let mut lesson_ids = HashSet::new();
            for lesson in &path.lessons {
                if !lesson_ids.insert(lesson.id.as_str()) {
                    return Err(CatalogError::DuplicateLesson {
                        path_id: path.id.clone(),
                        lesson_id: lesson.id.clone(),
                    });
                }

                if let LessonBody::MultipleChoice(quiz) = &lesson.body {
                    let bad_answer = quiz
                        .questions
                        .iter()
                        .any(|q| q.correct_option_index >= q.options.len());
                    if bad_answer || quiz.required_correct as usize > quiz.questions.len() {
                        return Err(CatalogError::InvalidQuiz {
                            path_id: path.id.clone(),
                            lesson_id: lesson.id.clone(),
                        });
                    }
                }
            }
        }

        tracing::info!(count = paths.len(), "Loaded learning paths");
        Ok(Self { paths })
    }

    /// The catalog shipped with the service.
    pub fn builtin() -> Self {
        // Validated by test_builtin_catalog_is_valid.
        Self::load_from_json(BUILTIN_CATALOG).unwrap_or_default()
    }

    /// Get the list of paths.
    pub fn paths(&self) -> &[CatalogPath] {
        &self.paths
    }

    /// Look up a path by id.
    pub fn get(&self, path_id: &str) -> Option<&CatalogPath> {
        self.paths.iter().find(|p| p.id == path_id)
    }
}

/// Errors from catalog loading.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read file: {0}")]
    IoError(String),

    #[error("Failed to parse catalog JSON: {0}")]
    ParseError(String),

    #[error("Duplicate learning path id: {0}")]
    DuplicatePath(String),

    #[error("Duplicate lesson id {lesson_id} in path {path_id}")]
    DuplicateLesson { path_id: String, lesson_id: String },

    #[error("Invalid multiple-choice lesson {lesson_id} in path {path_id}")]
    InvalidQuiz { path_id: String, lesson_id: String },
}

const BUILTIN_CATALOG: &str = r#"[
  {
    "id": "foundation_builder",
    "title": "Foundation Builder",
    "description": "Perfect for beginners! Build confidence with art basics through fun, bite-sized lessons.",
    "level": "Beginner",
    "targetUsers": "Complete beginners to art",
    "lessonCount": 15,
    "durationPerLesson": "2-3 minutes",
    "sampleLessons": ["Your First Circle", "Confident Lines", "Basic Shapes", "Simple Objects"],
    "lessons": []
  },
  {
    "id": "skill_sharpener",
    "title": "Skill Sharpener",
    "description": "Level up your existing skills with targeted technique improvements.",
    "level": "Intermediate",
    "targetUsers": "Artists with basic foundation skills",
    "lessonCount": 20,
    "durationPerLesson": "3-4 minutes",
    "sampleLessons": ["Line Variation Mastery", "Advanced Shading", "Composition Rules", "Style Development"],
    "lessons": []
  },
  {
    "id": "master_class",
    "title": "Master Class",
    "description": "Explore artistic styles and push creative boundaries.",
    "level": "Advanced",
    "targetUsers": "Intermediate to advanced artists",
    "lessonCount": 25,
    "durationPerLesson": "4-6 minutes",
    "sampleLessons": ["Finding Your Style", "Advanced Techniques", "Creative Exploration", "Portfolio Development"],
    "lessons": []
  }
]"#;
