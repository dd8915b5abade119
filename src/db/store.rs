// SPDX-License-Identifier: MIT

//! Credential store: typed operations over the `users` collection.
//!
//! The underlying client is a long-lived, process-wide resource that is
//! initialized lazily: the first operation establishes the connection,
//! concurrent first operations coalesce on the same in-flight attempt,
//! and every later operation reuses the cached handle.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::db::collections;
use crate::error::AppError;
use crate::models::{User, UserUpdate};

/// Handle to the user document store.
#[derive(Clone)]
pub struct UserStore {
    project_id: String,
    client: Arc<OnceCell<firestore::FirestoreDb>>,
    offline: bool,
}

impl UserStore {
    /// Create a store handle without connecting. The connection is opened
    /// by the first operation that needs it.
    ///
    /// For local development with the emulator, set FIRESTORE_EMULATOR_HOST.
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            client: Arc::new(OnceCell::new()),
            offline: false,
        }
    }

    /// Create a mock store for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            project_id: "offline".to_string(),
            client: Arc::new(OnceCell::new()),
            offline: true,
        }
    }

    /// Get the connected client, establishing the connection on first use.
    ///
    /// `OnceCell::get_or_try_init` serializes concurrent initializers, so
    /// racing first requests share one connection attempt instead of
    /// opening duplicates. A failed attempt leaves the cell empty and the
    /// next request retries.
    async fn client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        if self.offline {
            return Err(AppError::Database(
                "Database not connected (offline mode)".to_string(),
            ));
        }

        self.client
            .get_or_try_init(|| Self::connect(self.project_id.clone()))
            .await
    }

    async fn connect(project_id: String) -> Result<firestore::FirestoreDb, AppError> {
        // If the emulator environment variable is set, use an
        // unauthenticated connection to avoid local credential warnings
        // and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::connect_emulator(&project_id).await;
        }

        let client = firestore::FirestoreDb::new(&project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = %project_id, "Connected to Firestore");

        Ok(client)
    }

    /// Connect to the emulator with unauthenticated access.
    async fn connect_emulator(project_id: &str) -> Result<firestore::FirestoreDb, AppError> {
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

        Ok(client)
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by document id.
    pub async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        self.client()
            .await?
            .fluent()
            .select()
            .by_id_in(collections::USERS)
            .obj()
            .one(id)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the user holding the given email, if any.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        self.find_one_by_field("email", email).await
    }

    /// Find the user holding the given username, if any.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        self.find_one_by_field("username", username).await
    }

    async fn find_one_by_field(&self, field: &str, value: &str) -> Result<Option<User>, AppError> {
        let field = field.to_string();
        let value = value.to_string();

        let matches: Vec<User> = self
            .client()
            .await?
            .fluent()
            .select()
            .from(collections::USERS)
            .filter(move |q| q.field(&field).eq(value.clone()))
            .limit(1)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(matches.into_iter().next())
    }

    /// List every user document.
    pub async fn find_all(&self) -> Result<Vec<User>, AppError> {
        self.client()
            .await?
            .fluent()
            .select()
            .from(collections::USERS)
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a new user document keyed by its id.
    pub async fn insert(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .client()
            .await?
            .fluent()
            .insert()
            .into(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }

    /// Merge the provided fields over the stored document and return the
    /// updated record, or `None` if the id is unknown. The write replaces
    /// the single document atomically at the store level.
    pub async fn update(&self, id: &str, update: UserUpdate) -> Result<Option<User>, AppError> {
        let Some(mut user) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        user.apply_update(update);
        user.updated_at = chrono::Utc::now().to_rfc3339();

        self.upsert(&user).await?;
        Ok(Some(user))
    }

    /// Delete the user by id. Returns `false` if no such document exists.
    pub async fn delete(&self, id: &str) -> Result<bool, AppError> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }

        self.client()
            .await?
            .fluent()
            .delete()
            .from(collections::USERS)
            .document_id(id)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        tracing::info!(user_id = id, "User deleted");
        Ok(true)
    }

    /// Write the full document, creating or replacing it.
    async fn upsert(&self, user: &User) -> Result<(), AppError> {
        let _: () = self
            .client()
            .await?
            .fluent()
            .update()
            .in_col(collections::USERS)
            .document_id(&user.id)
            .object(user)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
