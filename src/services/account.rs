// SPDX-License-Identifier: MIT

//! Account service: registration and login orchestration.
//!
//! Registration checks uniqueness, hashes the password and stores the new
//! document with its default profile scaffolding. Login looks the account
//! up, verifies the password and mints the session token. Both report
//! credential failures through the single generic `InvalidCredentials`
//! variant so responses never reveal whether an email is registered.

use chrono::{Duration, Utc};
use uuid::Uuid;

use crate::db::UserStore;
use crate::error::AppError;
use crate::middleware::auth::create_session_token;
use crate::models::{Medication, Shipment, ShipmentStatus, User, WeightEntry};
use crate::services::password;

/// Orchestrates account registration and login.
#[derive(Clone)]
pub struct AccountService {
    store: UserStore,
    signing_key: Vec<u8>,
}

impl AccountService {
    pub fn new(store: UserStore, signing_key: Vec<u8>) -> Self {
        Self { store, signing_key }
    }

    /// Register a new account. Returns the new document id.
    ///
    /// Input validation (presence, email shape) happens at the HTTP
    /// layer; this checks uniqueness against the store before any
    /// mutation.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        plain_password: &str,
    ) -> Result<String, AppError> {
        let taken = self.store.find_by_email(email).await?.is_some()
            || self.store.find_by_username(username).await?.is_some();
        if taken {
            return Err(AppError::Conflict(
                "User with this email or username already exists".to_string(),
            ));
        }

        let password_hash = password::hash_password(plain_password).map_err(AppError::Internal)?;
        let user = scaffolded_user(username, email, password_hash);

        self.store.insert(&user).await?;
        tracing::info!(user_id = %user.id, "User registered");

        Ok(user.id)
    }

    /// Authenticate and mint a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller; the unknown-email path burns equivalent hashing work so
    /// timing does not leak the difference either.
    pub async fn login(&self, email: &str, plain_password: &str) -> Result<String, AppError> {
        let Some(user) = self.store.find_by_email(email).await? else {
            password::burn_verification(plain_password);
            return Err(AppError::InvalidCredentials);
        };

        match password::verify_password(plain_password, &user.password_hash) {
            Ok(true) => {}
            Ok(false) => return Err(AppError::InvalidCredentials),
            Err(err) => {
                // A hash that fails to parse is a data problem, but the
                // caller still only learns "invalid credentials".
                tracing::error!(user_id = %user.id, error = %err, "Stored password hash rejected");
                return Err(AppError::InvalidCredentials);
            }
        }

        let token = create_session_token(&user.id, user.is_admin, &self.signing_key)
            .map_err(AppError::Internal)?;

        tracing::info!(user_id = %user.id, "Login successful");
        Ok(token)
    }
}

/// Build a freshly registered user document with its default profile
/// scaffolding: a starter goal weight, a month of seeded weight history,
/// a default medication and one delivered shipment.
fn scaffolded_user(username: &str, email: &str, password_hash: String) -> User {
    let now = Utc::now();
    let days_ago = |days: i64| (now - Duration::days(days)).to_rfc3339();

    User {
        id: Uuid::new_v4().to_string(),
        username: username.to_string(),
        email: email.to_string(),
        password_hash,
        is_admin: false,
        goal_weight: Some(180.0),
        weight_data: vec![
            WeightEntry {
                date: days_ago(30),
                weight: 210.0,
            },
            WeightEntry {
                date: days_ago(15),
                weight: 205.0,
            },
            WeightEntry {
                date: now.to_rfc3339(),
                weight: 202.0,
            },
        ],
        medications: vec![Medication {
            kind: "Wellness-Pill".to_string(),
            dosage: "50mg".to_string(),
        }],
        shipments: vec![Shipment {
            date: days_ago(45),
            status: ShipmentStatus::Delivered,
            tracking: Some("1Z999AA10123456784".to_string()),
        }],
        next_shipment_date: Some((now + Duration::days(20)).to_rfc3339()),
        created_at: now.to_rfc3339(),
        updated_at: now.to_rfc3339(),
    }
}
