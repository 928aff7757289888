//! Business model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A business managed through the platform.
///
/// Every business has exactly one owner, set at creation and never
/// transferred. Deleting a business deactivates it along with its staff
/// memberships rather than erasing rows.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Business {
    /// Unique business identifier.
    pub id: Uuid,
    /// The owning user.
    pub owner_id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-form industry label.
    pub industry: String,
    /// Contact phone number.
    pub phone_number: String,
    /// Optional contact email.
    pub email: Option<String>,
    /// Optional postal address.
    pub address: Option<String>,
    /// False once the business has been deleted.
    pub is_active: bool,
    /// When the business was created.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a business.
#[derive(Debug, Clone)]
pub struct CreateBusiness {
    pub owner_id: Uuid,
    pub name: String,
    pub industry: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Payload for updating a business. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBusiness {
    pub name: Option<String>,
    pub industry: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}
