// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Progress store: Firestore client wrapper with typed operations.
//!
//! Holds one [`ProgressRecord`] per user in `user_progress/{user_id}`.
//! Besides Firestore, the store can run against a process-local map (local
//! development and tests) or in offline mode where every call fails.

use crate::db::collections;
use crate::error::AppError;
use crate::models::ProgressRecord;
use dashmap::DashMap;
use firestore::errors::{BackoffError, FirestoreError};
use futures_util::FutureExt;
use std::sync::Arc;

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    backend: Backend,
}

#[derive(Clone)]
enum Backend {
    Remote(firestore::FirestoreDb),
    Memory(Arc<DashMap<String, ProgressRecord>>),
    Offline,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            backend: Backend::Remote(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            backend: Backend::Remote(client),
        })
    }

    /// Create a store backed by a process-local map.
    ///
    /// Read-modify-write on one user holds that user's map entry locked, so
    /// concurrent updates for the same user are applied one after another.
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(Arc::new(DashMap::new())),
        }
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    fn offline_error() -> AppError {
        AppError::Database("Database not connected (offline mode)".to_string())
    }

    // ─── Progress Operations ─────────────────────────────────────

    /// Get a user's progress record, if one was ever written.
    pub async fn get_progress(&self, user_id: &str) -> Result<Option<ProgressRecord>, AppError> {
        match &self.backend {
            Backend::Remote(client) => client
                .fluent()
                .select()
                .by_id_in(collections::USER_PROGRESS)
                .obj()
                .one(user_id)
                .await
                .map_err(|e| AppError::Database(e.to_string())),
            Backend::Memory(records) => Ok(records.get(user_id).map(|r| r.value().clone())),
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    /// Overwrite a user's progress record.
    pub async fn set_progress(
        &self,
        user_id: &str,
        progress: &ProgressRecord,
    ) -> Result<(), AppError> {
        match &self.backend {
            Backend::Remote(client) => {
                let _: () = client
                    .fluent()
                    .update()
                    .in_col(collections::USER_PROGRESS)
                    .document_id(user_id)
                    .object(progress)
                    .execute()
                    .await
                    .map_err(|e| AppError::Database(e.to_string()))?;
                Ok(())
            }
            Backend::Memory(records) => {
                records.insert(user_id.to_string(), progress.clone());
                Ok(())
            }
            Backend::Offline => Err(Self::offline_error()),
        }
    }

    // ─── Atomic Progress Update ──────────────────────────────────

    /// Atomically read a user's progress (or a fresh record), apply `update`
    /// and write the result back.
    ///
    /// On Firestore the read registers the document with the transaction; if
    /// another request commits to the same document first, Firestore aborts
    /// the commit and the whole closure runs again on fresh data. `update`
    /// must therefore be free of side effects.
    ///
    /// Returns the record as written.
    pub async fn update_progress_atomic<F>(
        &self,
        user_id: &str,
        update: F,
    ) -> Result<ProgressRecord, AppError>
    where
        F: Fn(ProgressRecord) -> ProgressRecord + Send + Sync + 'static,
    {
        match &self.backend {
            Backend::Remote(client) => {
                let update = Arc::new(update);
                let user_id = user_id.to_string();

                client
                    .run_transaction(|db, transaction| {
                        let update = update.clone();
                        let user_id = user_id.clone();

                        async move {
                            let current: Option<ProgressRecord> = db
                                .fluent()
                                .select()
                                .by_id_in(collections::USER_PROGRESS)
                                .obj()
                                .one(&user_id)
                                .await?;

                            let next = update(current.unwrap_or_default());

                            db.fluent()
                                .update()
                                .in_col(collections::USER_PROGRESS)
                                .document_id(&user_id)
                                .object(&next)
                                .add_to_transaction(transaction)?;

                            Ok::<ProgressRecord, BackoffError<FirestoreError>>(next)
                        }
                        .boxed()
                    })
                    .await
                    .map_err(|e| {
                        AppError::Database(format!("Progress transaction failed: {}", e))
                    })
            }
            Backend::Memory(records) => {
                let mut entry = records.entry(user_id.to_string()).or_default();
                let next = update(entry.value().clone());
                *entry.value_mut() = next.clone();
                Ok(next)
            }
            Backend::Offline => Err(Self::offline_error()),
        }
    }
}
