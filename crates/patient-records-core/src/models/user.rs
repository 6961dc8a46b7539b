//! User account models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. Gates which portal features a user may reach.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Doctor,
    Nurse,
    Patient,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Nurse => "nurse",
            Role::Patient => "patient",
        }
    }

    /// Staff roles are the ones that work from the dashboard.
    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Patient)
    }

    /// Whether this role may add patients.
    pub fn can_manage_patients(&self) -> bool {
        matches!(self, Role::Admin | Role::Doctor)
    }

    /// Whether this role may read the audit trail.
    pub fn can_view_audit_log(&self) -> bool {
        matches!(self, Role::Admin)
    }

    /// Whether this role is automatically placed on new patients' care team.
    pub fn joins_care_team(&self) -> bool {
        matches!(self, Role::Doctor | Role::Nurse)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "nurse" => Ok(Role::Nurse),
            "patient" => Ok(Role::Patient),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// A portal account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    /// Linked patient record, only for `Role::Patient` accounts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patient_id: Option<String>,
    /// Stored and compared as plaintext
    pub password: String,
}

impl User {
    /// Check a password attempt against the stored one.
    pub fn password_matches(&self, attempt: &str) -> bool {
        self.password == attempt
    }
}

/// Fields supplied when creating a user; the store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub email: String,
    pub full_name: String,
    pub role: Role,
    pub patient_id: Option<String>,
    pub password: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: String) -> User {
        User {
            id,
            email: self.email,
            full_name: self.full_name,
            role: self.role,
            patient_id: self.patient_id,
            password: self.password,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Doctor).unwrap(), r#""doctor""#);
        let role: Role = serde_json::from_str(r#""nurse""#).unwrap();
        assert_eq!(role, Role::Nurse);
    }

    #[test]
    fn test_role_permissions() {
        assert!(Role::Admin.can_manage_patients());
        assert!(Role::Doctor.can_manage_patients());
        assert!(!Role::Nurse.can_manage_patients());
        assert!(Role::Admin.can_view_audit_log());
        assert!(!Role::Doctor.can_view_audit_log());
        assert!(!Role::Patient.is_staff());
    }

    #[test]
    fn test_user_json_layout() {
        let user = User {
            id: "7".into(),
            email: "a@b.com".into(),
            full_name: "A B".into(),
            role: Role::Patient,
            patient_id: Some("p1".into()),
            password: "pw".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["fullName"], "A B");
        assert_eq!(json["patientId"], "p1");

        let staff = User { patient_id: None, ..user };
        let json = serde_json::to_value(&staff).unwrap();
        assert!(json.get("patientId").is_none());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
        assert!("janitor".parse::<Role>().is_err());
    }
}
