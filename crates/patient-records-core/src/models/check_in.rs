//! Check-in models.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// A staff member's visit note on a patient. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckIn {
    pub id: String,
    pub patient_id: String,
    pub user_id: String,
    /// Denormalized so the note survives account renames
    pub user_name: String,
    pub user_role: Role,
    pub notes: String,
    pub timestamp: DateTime<Utc>,
}

impl CheckIn {
    /// Whether this check-in happened on the given UTC day.
    pub fn is_on(&self, day: NaiveDate) -> bool {
        self.timestamp.date_naive() == day
    }
}

/// Fields supplied when recording a check-in.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCheckIn {
    pub patient_id: String,
    pub user_id: String,
    pub user_name: String,
    pub user_role: Role,
    pub notes: String,
}

impl NewCheckIn {
    pub(crate) fn into_check_in(self, id: String) -> CheckIn {
        CheckIn {
            id,
            patient_id: self.patient_id,
            user_id: self.user_id,
            user_name: self.user_name,
            user_role: self.user_role,
            notes: self.notes,
            timestamp: Utc::now(),
        }
    }
}
