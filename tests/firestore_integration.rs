// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore integration tests.
//!
//! These tests require the Firestore emulator to be running
//! (FIRESTORE_EMULATOR_HOST set). They are skipped otherwise.

use artpath::models::{LessonEvent, ProgressRecord};
use artpath::services::progress;
use chrono::{Duration, TimeZone, Utc};

mod common;
use common::{test_catalog, test_db};

/// Generate a unique user id for test isolation.
fn unique_user_id() -> String {
    format!("test-user-{}", uuid::Uuid::new_v4())
}

#[tokio::test]
async fn test_progress_roundtrip() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    // Initially, no record
    assert!(db.get_progress(&user_id).await.unwrap().is_none());

    let mut record = ProgressRecord {
        total_xp: 120,
        level: 2,
        current_streak: 3,
        longest_streak: 5,
        ..Default::default()
    };
    record.completed_paths.push("foundation_builder".to_string());
    record.last_active = Some(Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap());

    db.set_progress(&user_id, &record).await.unwrap();

    let fetched = db.get_progress(&user_id).await.unwrap().unwrap();
    assert_eq!(fetched, record);
}

#[tokio::test]
async fn test_atomic_update_applies_engine() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();
    let catalog = test_catalog();
    let path = catalog.get("foundation_builder").unwrap().clone();
    let day1 = Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap();

    let event = LessonEvent::from_flags("foundation_builder", "circle-theory", 15, true, false);
    let (event_1, path_1) = (event.clone(), path.clone());
    let record = db
        .update_progress_atomic(&user_id, move |current| {
            progress::apply(current, &event_1, Some(&path_1), day1)
        })
        .await
        .unwrap();
    assert_eq!(record.total_xp, 15);
    assert_eq!(record.current_streak, 1);

    let event = LessonEvent::from_flags("foundation_builder", "your-first-circle", 20, true, false);
    let day2 = day1 + Duration::days(1);
    db.update_progress_atomic(&user_id, move |current| {
        progress::apply(current, &event, Some(&path), day2)
    })
    .await
    .unwrap();

    let stored = db.get_progress(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.total_xp, 35);
    assert_eq!(stored.current_streak, 2);
    assert_eq!(stored.active_paths["foundation_builder"].lessons_completed, 2);
}

#[tokio::test]
async fn test_concurrent_atomic_updates() {
    require_emulator!();

    let db = test_db().await;
    let user_id = unique_user_id();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let db = db.clone();
        let user_id = user_id.clone();
        handles.push(tokio::spawn(async move {
            db.update_progress_atomic(&user_id, |mut current| {
                current.total_xp += 10;
                current.level = progress::level_for_xp(current.total_xp);
                current
            })
            .await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let stored = db.get_progress(&user_id).await.unwrap().unwrap();
    assert_eq!(stored.total_xp, 50);
}
