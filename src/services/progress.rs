// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress engine.
//!
//! Pure functions over [`ProgressRecord`]: no I/O, no clock reads. The store
//! may replay [`apply`] when a transaction is retried, so everything it
//! depends on is passed in.

use crate::models::catalog::CatalogPath;
use crate::models::{LessonAction, LessonEvent, LessonProgress, PathProgress, ProgressRecord};
use crate::time_utils::utc_date;
use chrono::{DateTime, Utc};

const XP_PER_LEVEL: u64 = 100;

/// Level reached with a given amount of XP.
pub fn level_for_xp(total_xp: u64) -> u64 {
    total_xp / XP_PER_LEVEL + 1
}

/// Bring derived fields in line with the stored counters.
///
/// Stored documents may predate a field or carry a stale `level`.
pub fn normalize(mut record: ProgressRecord) -> ProgressRecord {
    record.level = level_for_xp(record.total_xp);
    record
}

/// Compute the record that results from one lesson event.
///
/// `path` is the catalog entry for `event.path_id`; when it is absent the
/// path is created with its id as title and zero lessons.
pub fn apply(
    mut record: ProgressRecord,
    event: &LessonEvent,
    path: Option<&CatalogPath>,
    now: DateTime<Utc>,
) -> ProgressRecord {
    if event.action == LessonAction::Noop {
        return record;
    }
    record.level = level_for_xp(record.total_xp);

    let previous_active = record.last_active;
    let path_id = event.path_id.as_str();

    let path_progress = record
        .active_paths
        .entry(path_id.to_string())
        .or_insert_with(|| match path {
            Some(p) => PathProgress::new(path_id, &p.title, p.total_lessons()),
            None => PathProgress::new(path_id, path_id, 0),
        });

    let lesson = path_progress
        .lessons
        .entry(event.lesson_id.clone())
        .or_insert_with(|| LessonProgress::new(&event.lesson_id));

    match event.action {
        LessonAction::Complete { xp_earned } => {
            let xp = u64::from(xp_earned);
            let is_new_completion = !lesson.completed;

            lesson.completed = true;
            lesson.xp_earned = lesson.xp_earned.saturating_add(xp);
            lesson.attempts = lesson.attempts.saturating_add(1);
            lesson.last_completed = Some(now);

            let mut path_finished = false;
            if is_new_completion {
                // Never count past the catalog size; zero-lesson paths still
                // count their first completion.
                if path_progress.total_lessons == 0
                    || path_progress.lessons_completed < path_progress.total_lessons
                {
                    path_progress.lessons_completed += 1;
                }
                path_finished = path_progress.lessons_completed >= path_progress.total_lessons;
                if path_finished && path_progress.total_lessons == 0 {
                    tracing::warn!(
                        path_id,
                        lesson_id = %event.lesson_id,
                        "Path has no lessons in catalog; marking it completed after one lesson"
                    );
                }
            }

            path_progress.xp_earned = path_progress.xp_earned.saturating_add(xp);
            path_progress.last_accessed = Some(now);

            if path_finished && !record.completed_paths.iter().any(|p| p == path_id) {
                record.completed_paths.push(path_id.to_string());
            }

            record.total_xp = record.total_xp.saturating_add(xp);
            record.level = level_for_xp(record.total_xp);

            record.current_streak = next_streak(record.current_streak, previous_active, now);
            record.longest_streak = record.longest_streak.max(record.current_streak);
            record.last_active = Some(now);
        }
        LessonAction::Start => {
            lesson.attempts = lesson.attempts.saturating_add(1);
            path_progress.last_accessed = Some(now);
        }
        LessonAction::Noop => {}
    }

    record
}

/// Streak after a completion at `now`, given the previous completion time.
///
/// Calendar days are UTC. A completion on the same day as the previous one
/// keeps the streak; the day after extends it; anything else restarts it.
fn next_streak(current: u32, last_active: Option<DateTime<Utc>>, now: DateTime<Utc>) -> u32 {
    let today = utc_date(now);

    match last_active.map(utc_date) {
        None => 1,
        Some(last) if last == today => current,
        Some(last) if today.pred_opt() == Some(last) => current.saturating_add(1),
        Some(_) => 1,
    }
}

/// Progress view of a path for display.
///
/// Uses the user's stored progress when present, otherwise an untouched
/// progress entry sized from the catalog.
pub fn merge_view(catalog_entry: &CatalogPath, progress: Option<&PathProgress>) -> PathProgress {
    match progress {
        Some(p) => p.clone(),
        None => PathProgress::new(
            &catalog_entry.id,
            &catalog_entry.title,
            catalog_entry.total_lessons(),
        ),
    }
}
