//! Shared types for the API layer.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use rusqlite::Connection;

use crate::api::error::ApiError;
use crate::db::{self, DatabaseError};
use crate::insights::AssistantClient;

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    db_path: Arc<PathBuf>,
    pub tokens: Arc<RwLock<TokenRegistry>>,
    pub assistant: Arc<dyn AssistantClient>,
}

impl ApiContext {
    pub fn new(db_path: PathBuf, assistant: Arc<dyn AssistantClient>) -> Self {
        Self {
            db_path: Arc::new(db_path),
            tokens: Arc::new(RwLock::new(TokenRegistry::new())),
            assistant,
        }
    }

    /// Open a connection for this request. SQLite connections are cheap to
    /// open and not Sync, so each handler gets its own.
    pub fn open_db(&self) -> Result<Connection, DatabaseError> {
        db::open_database(&self.db_path)
    }

    /// Seed the token registry from stored profiles.
    pub fn seed_tokens(&self) -> Result<usize, ApiError> {
        let conn = self.open_db()?;
        let profiles = db::list_profiles(&conn)?;
        let mut registry = self
            .tokens
            .write()
            .map_err(|_| ApiError::Internal("token registry lock".into()))?;
        let mut seeded = 0;
        for profile in profiles {
            if let Some(hash) = &profile.api_token_hash {
                registry.register(hash.clone(), &profile.id, &profile.full_name);
                seeded += 1;
            }
        }
        Ok(seeded)
    }
}

/// Authenticated user context, injected into request extensions by the
/// auth middleware after successful token validation.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: String,
    pub full_name: String,
}

/// In-memory registry mapping API-token hashes to users. Token issuance
/// is owned by the external auth subsystem; we only resolve identities.
#[derive(Debug, Default)]
pub struct TokenRegistry {
    by_hash: HashMap<String, UserContext>,
}

impl TokenRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, token_hash: String, user_id: &str, full_name: &str) {
        self.by_hash.insert(
            token_hash,
            UserContext {
                user_id: user_id.to_string(),
                full_name: full_name.to_string(),
            },
        );
    }

    /// Resolve a raw bearer token to its user.
    pub fn resolve(&self, token: &str) -> Option<UserContext> {
        self.by_hash.get(&hash_token(token)).cloned()
    }

    pub fn len(&self) -> usize {
        self.by_hash.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_hash.is_empty()
    }
}

/// Hash a bearer token string using SHA-256, hex-encoded.
pub fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Generate a random bearer token (URL-safe base64, 32 bytes of entropy).
pub fn generate_token() -> String {
    use base64::Engine;
    let bytes: [u8; 32] = rand::random();
    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(bytes)
}
