// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Learning path catalog entries and typed lesson definitions.

use serde::{Deserialize, Serialize};

/// A learning path as described by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPath {
    /// Path id (e.g., "foundation_builder")
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Difficulty label shown to users ("Beginner", ...)
    #[serde(default)]
    pub level: String,
    #[serde(default)]
    pub target_users: String,
    /// Declared lesson count, used when `lessons` is not listed
    #[serde(default)]
    pub lesson_count: u32,
    #[serde(default)]
    pub duration_per_lesson: String,
    #[serde(default)]
    pub sample_lessons: Vec<String>,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

impl CatalogPath {
    /// Number of lessons a learner has to finish to complete the path.
    pub fn total_lessons(&self) -> u32 {
        if self.lessons.is_empty() {
            self.lesson_count
        } else {
            self.lessons.len() as u32
        }
    }

    pub fn lesson(&self, lesson_id: &str) -> Option<&Lesson> {
        self.lessons.iter().find(|l| l.id == lesson_id)
    }
}

/// One lesson of a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub xp_reward: u32,
    #[serde(flatten)]
    pub body: LessonBody,
}

/// Lesson content, tagged by `type` with the payload under `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "content", rename_all = "camelCase")]
pub enum LessonBody {
    /// Drawing done in the app against a timer
    QuickDraw(QuickDrawContent),
    /// Theory quiz
    MultipleChoice(MultipleChoiceContent),
    /// Exercise done away from the screen
    RealPractice(RealPracticeContent),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuickDrawContent {
    pub instructions: String,
    /// Seconds
    pub time_limit: u32,
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
    #[serde(default)]
    pub success_criteria: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub image_url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultipleChoiceContent {
    pub introduction: String,
    pub questions: Vec<Question>,
    /// Correct answers needed to pass
    pub required_correct: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    pub explanation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealPracticeContent {
    pub introduction: String,
    pub instructions: Vec<String>,
    pub time_estimate: String,
    #[serde(default)]
    pub tips: Vec<String>,
    pub completion_criteria: String,
}

/// Outcome of grading a multiple-choice lesson.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeResult {
    pub correct: u32,
    pub total: u32,
    pub passed: bool,
    /// Per question; `None` when no answer was given
    pub answers: Vec<Option<bool>>,
}

impl MultipleChoiceContent {
    /// Grade answers given as option indices, one per question in order.
    ///
    /// Missing answers count as wrong; extra answers are ignored.
    pub fn grade(&self, answers: &[usize]) -> GradeResult {
        let results: Vec<Option<bool>> = self
            .questions
            .iter()
            .enumerate()
            .map(|(i, q)| answers.get(i).map(|&a| a == q.correct_option_index))
            .collect();

        let correct = results.iter().filter(|r| **r == Some(true)).count() as u32;

        GradeResult {
            correct,
            total: self.questions.len() as u32,
            passed: correct >= self.required_correct,
            answers: results,
        }
    }
}
