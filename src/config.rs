//! Application configuration loaded from environment variables.
//!
//! Values are read once at startup and handed to handlers through
//! [`crate::AppState`].

use std::env;

const DEFAULT_VISION_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Which backend holds per-user progress records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressStoreKind {
    /// Cloud Firestore (or the emulator when FIRESTORE_EMULATOR_HOST is set)
    Firestore,
    /// Process-local map, for development without Firestore
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
    /// GCP project ID
    pub gcp_project_id: String,
    /// Server port
    pub port: u16,
    /// Optional JSON file with learning paths (built-in catalog otherwise)
    pub catalog_path: Option<String>,
    /// Progress store backend
    pub progress_store: ProgressStoreKind,
    /// Chat-completions endpoint of the vision model
    pub vision_api_url: String,
    /// Vision model name
    pub vision_model: String,

    // --- Secrets ---
    /// JWT verification key for caller identity (raw bytes)
    pub jwt_signing_key: Vec<u8>,
    /// Vision API key; assessments fall back to a canned analysis without it
    pub vision_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A `.env` file is honoured for local development.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let progress_store = match env::var("PROGRESS_STORE").as_deref() {
            Ok("memory") => ProgressStoreKind::Memory,
            Ok("firestore") | Err(_) => ProgressStoreKind::Firestore,
            Ok(_) => return Err(ConfigError::Invalid("PROGRESS_STORE")),
        };

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            gcp_project_id: env::var("GCP_PROJECT_ID").unwrap_or_else(|_| "local-dev".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            catalog_path: env::var("CATALOG_PATH").ok().filter(|p| !p.is_empty()),
            progress_store,
            vision_api_url: env::var("VISION_API_URL")
                .unwrap_or_else(|_| DEFAULT_VISION_API_URL.to_string()),
            vision_model: env::var("VISION_MODEL")
                .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string()),

            jwt_signing_key: env::var("JWT_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("JWT_SIGNING_KEY"))?
                .into_bytes(),
            vision_api_key: env::var("VISION_API_KEY")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Deterministic configuration for tests.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            gcp_project_id: "test-project".to_string(),
            port: 8080,
            catalog_path: None,
            progress_store: ProgressStoreKind::Memory,
            vision_api_url: "http://127.0.0.1:9/v1/chat/completions".to_string(),
            vision_model: "test-vision-model".to_string(),
            jwt_signing_key: b"test_jwt_key_32_bytes_minimum!!".to_vec(),
            vision_api_key: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable: {0}")]
    Invalid(&'static str),
}
