//! Database layer (Firestore).

pub mod firestore;

pub use firestore::FirestoreDb;

/// Collection names as constants.
pub mod collections {
    /// Per-user progress records (keyed by user id)
    pub const USER_PROGRESS: &str = "user_progress";
}
