// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user learning progress as stored in the progress store.
//!
//! Field names are camelCase on the wire and in Firestore so existing
//! clients keep working.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One progress document per user, keyed by user id.
///
/// Stored at: `user_progress/{user_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressRecord {
    /// Consecutive calendar days with at least one completion
    #[serde(default)]
    pub current_streak: u32,
    /// Highest `current_streak` ever reached
    #[serde(default)]
    pub longest_streak: u32,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_xp: u64,
    /// Always `total_xp / 100 + 1`
    #[serde(default = "default_level")]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub level: u64,
    /// Paths in the order they were finished; never contains duplicates
    #[serde(default)]
    pub completed_paths: Vec<String>,
    #[serde(default)]
    pub active_paths: HashMap<String, PathProgress>,
    #[serde(default)]
    pub achievements: Vec<String>,
    /// Last lesson completion
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_active: Option<DateTime<Utc>>,
}

fn default_level() -> u64 {
    1
}

impl Default for ProgressRecord {
    fn default() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            total_xp: 0,
            level: default_level(),
            completed_paths: Vec::new(),
            active_paths: HashMap::new(),
            achievements: Vec::new(),
            last_active: None,
        }
    }
}

/// A user's progress through one learning path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct PathProgress {
    pub id: String,
    /// Catalog title at first touch
    pub title: String,
    #[serde(default)]
    pub lessons_completed: u32,
    /// Catalog lesson count at first touch
    #[serde(default)]
    pub total_lessons: u32,
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_earned: u64,
    #[serde(default)]
    pub lessons: HashMap<String, LessonProgress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_accessed: Option<DateTime<Utc>>,
}

impl PathProgress {
    /// Fresh, untouched progress for a path.
    pub fn new(id: &str, title: &str, total_lessons: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            lessons_completed: 0,
            total_lessons,
            xp_earned: 0,
            lessons: HashMap::new(),
            last_accessed: None,
        }
    }
}

/// A user's history with one lesson.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LessonProgress {
    pub id: String,
    /// Once true, stays true
    #[serde(default)]
    pub completed: bool,
    /// Summed over every completion, including repeats
    #[serde(default)]
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub xp_earned: u64,
    /// Starts plus completions
    #[serde(default)]
    pub attempts: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_completed: Option<DateTime<Utc>>,
}

impl LessonProgress {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            completed: false,
            xp_earned: 0,
            attempts: 0,
            last_completed: None,
        }
    }
}

/// What happened to a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LessonAction {
    /// Lesson finished, awarding XP
    Complete { xp_earned: u32 },
    /// Lesson opened
    Start,
    /// Neither flag set; leaves the record as it is
    Noop,
}

/// A validated progress event for one lesson of one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonEvent {
    pub path_id: String,
    pub lesson_id: String,
    pub action: LessonAction,
}

impl LessonEvent {
    /// Build an event from the request flags.
    ///
    /// `completed` wins when both flags are set; `xp_earned` only counts for
    /// completions.
    pub fn from_flags(
        path_id: impl Into<String>,
        lesson_id: impl Into<String>,
        xp_earned: u32,
        completed: bool,
        started: bool,
    ) -> Self {
        let action = if completed {
            LessonAction::Complete { xp_earned }
        } else if started {
            LessonAction::Start
        } else {
            LessonAction::Noop
        };

        Self {
            path_id: path_id.into(),
            lesson_id: lesson_id.into(),
            action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_serializes_with_wire_names() {
        let json = serde_json::to_value(ProgressRecord::default()).unwrap();

        assert_eq!(json["currentStreak"], 0);
        assert_eq!(json["longestStreak"], 0);
        assert_eq!(json["totalXp"], 0);
        assert_eq!(json["level"], 1);
        assert_eq!(json["completedPaths"], serde_json::json!([]));
        assert_eq!(json["activePaths"], serde_json::json!({}));
        assert_eq!(json["achievements"], serde_json::json!([]));
        assert!(json["lastActive"].is_null());
    }

    #[test]
    fn test_sparse_stored_document_fills_defaults() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"totalXp": 250, "activePaths": {}}"#).unwrap();

        assert_eq!(record.total_xp, 250);
        assert_eq!(record.current_streak, 0);
        assert!(record.completed_paths.is_empty());
        assert!(record.last_active.is_none());
    }

    #[test]
    fn test_completed_flag_takes_precedence() {
        let event = LessonEvent::from_flags("p", "l", 10, true, true);
        assert_eq!(event.action, LessonAction::Complete { xp_earned: 10 });

        let event = LessonEvent::from_flags("p", "l", 10, false, true);
        assert_eq!(event.action, LessonAction::Start);

        let event = LessonEvent::from_flags("p", "l", 10, false, false);
        assert_eq!(event.action, LessonAction::Noop);
    }
}
