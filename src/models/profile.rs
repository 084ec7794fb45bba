//! User profile model for storage and API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Profile stored in Firestore, keyed by the authenticated subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserProfile {
    /// Identity provider subject (also used as document ID)
    pub id: String,
    /// Email address (may be None if not shared)
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Soft reference to the user's home dropzone
    pub home_dropzone_id: Option<String>,
    /// USPA or equivalent license number
    pub license_number: Option<String>,
    /// Lifetime jump count
    pub total_jumps: Option<u32>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub created_at: DateTime<Utc>,
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub updated_at: DateTime<Utc>,
}

/// Validated partial profile update.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub home_dropzone_id: Option<String>,
    pub license_number: Option<String>,
    pub total_jumps: Option<u32>,
}
