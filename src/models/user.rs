//! User model for storage and API.

use serde::{Deserialize, Serialize};

/// One weight observation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Observation date (RFC 3339)
    pub date: String,
    /// Weight in pounds
    pub weight: f64,
}

/// One prescribed medication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Medication {
    /// Medication type (stored under the `type` key)
    #[serde(rename = "type")]
    pub kind: String,
    /// Dosage, free-form ("50mg")
    pub dosage: String,
}

/// Shipment fulfillment state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
}

/// One medication shipment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    /// Shipment date (RFC 3339)
    pub date: String,
    pub status: ShipmentStatus,
    /// Carrier tracking reference, if assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<String>,
}

/// User document stored in the `users` collection.
///
/// The only persistent entity in the system. `password_hash` is stored
/// with the document but never serialized into client responses; those
/// go through [`UserProfile`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Document id (UUID v4, assigned at registration)
    pub id: String,
    /// Globally unique username
    pub username: String,
    /// Globally unique email
    pub email: String,
    /// Argon2 PHC hash of the password
    pub password_hash: String,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub goal_weight: Option<f64>,
    #[serde(default)]
    pub weight_data: Vec<WeightEntry>,
    #[serde(default)]
    pub medications: Vec<Medication>,
    #[serde(default)]
    pub shipments: Vec<Shipment>,
    #[serde(default)]
    pub next_shipment_date: Option<String>,
    /// When the account was created (RFC 3339)
    pub created_at: String,
    /// Last modification timestamp (RFC 3339)
    pub updated_at: String,
}

/// Partial user document accepted by the admin update endpoint.
///
/// There is deliberately no `id` field: serde drops unknown keys, so an
/// `id` submitted in the body can never reassign the record's identity.
/// The password hash is likewise not updatable through this path.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserUpdate {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_admin: Option<bool>,
    #[serde(default)]
    pub goal_weight: Option<f64>,
    #[serde(default)]
    pub weight_data: Option<Vec<WeightEntry>>,
    #[serde(default)]
    pub medications: Option<Vec<Medication>>,
    #[serde(default)]
    pub shipments: Option<Vec<Shipment>>,
    #[serde(default)]
    pub next_shipment_date: Option<String>,
}

impl User {
    /// Merge the provided fields of `update` over this document.
    /// Omitted fields are left unchanged.
    pub fn apply_update(&mut self, update: UserUpdate) {
        if let Some(username) = update.username {
            self.username = username;
        }
        if let Some(email) = update.email {
            self.email = email;
        }
        if let Some(is_admin) = update.is_admin {
            self.is_admin = is_admin;
        }
        if let Some(goal_weight) = update.goal_weight {
            self.goal_weight = Some(goal_weight);
        }
        if let Some(weight_data) = update.weight_data {
            self.weight_data = weight_data;
        }
        if let Some(medications) = update.medications {
            self.medications = medications;
        }
        if let Some(shipments) = update.shipments {
            self.shipments = shipments;
        }
        if let Some(next_shipment_date) = update.next_shipment_date {
            self.next_shipment_date = Some(next_shipment_date);
        }
    }
}

/// Client-facing view of a user. Excludes the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub goal_weight: Option<f64>,
    pub weight_data: Vec<WeightEntry>,
    pub medications: Vec<Medication>,
    pub shipments: Vec<Shipment>,
    pub next_shipment_date: Option<String>,
    pub created_at: String,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            goal_weight: user.goal_weight,
            weight_data: user.weight_data,
            medications: user.medications,
            shipments: user.shipments,
            next_shipment_date: user.next_shipment_date,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "user-1".to_string(),
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            is_admin: false,
            goal_weight: Some(180.0),
            weight_data: vec![WeightEntry {
                date: "2026-01-01T00:00:00Z".to_string(),
                weight: 205.0,
            }],
            medications: vec![],
            shipments: vec![],
            next_shipment_date: None,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            updated_at: "2026-01-01T00:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_apply_update_merges_only_provided_fields() {
        let mut user = sample_user();
        user.apply_update(UserUpdate {
            goal_weight: Some(170.0),
            medications: Some(vec![Medication {
                kind: "Wellness-Pill".to_string(),
                dosage: "25mg".to_string(),
            }]),
            ..UserUpdate::default()
        });

        assert_eq!(user.goal_weight, Some(170.0));
        assert_eq!(user.medications.len(), 1);
        // Untouched fields survive the merge
        assert_eq!(user.username, "alice");
        assert_eq!(user.weight_data.len(), 1);
    }

    #[test]
    fn test_update_ignores_id_in_body() {
        // An `id` key in the payload is dropped during deserialization,
        // so identity reassignment through the update path is impossible.
        let update: UserUpdate =
            serde_json::from_str(r#"{"id": "someone-else", "goal_weight": 150}"#).unwrap();

        let mut user = sample_user();
        user.apply_update(update);

        assert_eq!(user.id, "user-1");
        assert_eq!(user.goal_weight, Some(150.0));
    }

    #[test]
    fn test_shipment_status_serialized_pascal_case() {
        let shipment = Shipment {
            date: "2026-01-01T00:00:00Z".to_string(),
            status: ShipmentStatus::Delivered,
            tracking: Some("1Z999AA10123456784".to_string()),
        };
        let json = serde_json::to_value(&shipment).unwrap();
        assert_eq!(json["status"], "Delivered");

        let parsed: Shipment = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.status, ShipmentStatus::Delivered);
    }

    #[test]
    fn test_profile_has_no_password_hash() {
        let profile = UserProfile::from(sample_user());
        let json = serde_json::to_value(&profile).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["username"], "alice");
    }

    #[test]
    fn test_medication_uses_type_key() {
        let medication = Medication {
            kind: "Wellness-Pill".to_string(),
            dosage: "50mg".to_string(),
        };
        let json = serde_json::to_value(&medication).unwrap();
        assert_eq!(json["type"], "Wellness-Pill");
    }
}
