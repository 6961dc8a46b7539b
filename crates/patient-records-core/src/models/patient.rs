//! Patient models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Recorded gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            other => Err(format!("Unknown gender: {}", other)),
        }
    }
}

/// A patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: String,
    /// Derived `NNN-X` identifier shown to staff
    pub case_number: String,
    pub first_name: String,
    pub last_name: String,
    /// ISO date (`YYYY-MM-DD`) as entered
    pub date_of_birth: String,
    pub gender: Gender,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub medical_history: String,
    pub allergies: String,
    pub current_medications: String,
    /// User ids on the care team (not checked against the users collection)
    pub assigned_to: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Patient {
    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assigned_to.iter().any(|id| id == user_id)
    }

    /// Age in whole years on `day`, or `None` if the date of birth does not parse.
    pub fn age_on(&self, day: NaiveDate) -> Option<u32> {
        let born = NaiveDate::parse_from_str(&self.date_of_birth, "%Y-%m-%d").ok()?;
        let mut age = day.year() - born.year();
        if (day.month(), day.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        u32::try_from(age).ok()
    }

    /// Touch the updated_at timestamp, never moving it backwards or standing still.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + chrono::Duration::microseconds(1)
        };
    }
}

/// Fields supplied when creating a patient.
///
/// The store assigns `id`, `case_number`, `created_at` and `updated_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewPatient {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub medical_history: String,
    pub allergies: String,
    pub current_medications: String,
    pub assigned_to: Vec<String>,
}

impl NewPatient {
    pub(crate) fn into_patient(self, id: String, case_number: String) -> Patient {
        let now = Utc::now();
        Patient {
            id,
            case_number,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth: self.date_of_birth,
            gender: self.gender,
            blood_type: self.blood_type,
            phone: self.phone,
            email: self.email,
            address: self.address,
            medical_history: self.medical_history,
            allergies: self.allergies,
            current_medications: self.current_medications,
            assigned_to: self.assigned_to,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial patient update. `None` leaves the stored value alone.
///
/// `id`, `case_number` and `created_at` cannot be changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatientUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub gender: Option<Gender>,
    pub blood_type: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub medical_history: Option<String>,
    pub allergies: Option<String>,
    pub current_medications: Option<String>,
    pub assigned_to: Option<Vec<String>>,
}

impl PatientUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge present fields over `patient` and refresh `updated_at`.
    pub fn apply_to(self, patient: &mut Patient) {
        fn merge<T>(slot: &mut T, value: Option<T>) {
            if let Some(value) = value {
                *slot = value;
            }
        }

        merge(&mut patient.first_name, self.first_name);
        merge(&mut patient.last_name, self.last_name);
        merge(&mut patient.date_of_birth, self.date_of_birth);
        merge(&mut patient.gender, self.gender);
        merge(&mut patient.blood_type, self.blood_type);
        merge(&mut patient.phone, self.phone);
        merge(&mut patient.email, self.email);
        merge(&mut patient.address, self.address);
        merge(&mut patient.medical_history, self.medical_history);
        merge(&mut patient.allergies, self.allergies);
        merge(&mut patient.current_medications, self.current_medications);
        merge(&mut patient.assigned_to, self.assigned_to);
        patient.touch();
    }
}
