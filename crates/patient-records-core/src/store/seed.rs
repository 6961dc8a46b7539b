//! Demonstration records written into a fresh storage area.

use chrono::Utc;

use crate::models::{Gender, Patient, Role, User};

/// Admin, doctor and nurse accounts with fixed plaintext passwords.
pub fn demo_users() -> Vec<User> {
    let user = |id: &str, email: &str, full_name: &str, role: Role, password: &str| User {
        id: id.into(),
        email: email.into(),
        full_name: full_name.into(),
        role,
        patient_id: None,
        password: password.into(),
    };

    vec![
        user("1", "admin@hospital.com", "Admin User", Role::Admin, "admin123"),
        user("2", "doctor@hospital.com", "Dr. Sarah Johnson", Role::Doctor, "doctor123"),
        user("3", "nurse@hospital.com", "Nurse Mike Chen", Role::Nurse, "nurse123"),
    ]
}

struct DemoPatient {
    id: &'static str,
    case_number: &'static str,
    first_name: &'static str,
    last_name: &'static str,
    date_of_birth: &'static str,
    gender: Gender,
    blood_type: &'static str,
    phone: &'static str,
    email: &'static str,
    address: &'static str,
    medical_history: &'static str,
    allergies: &'static str,
    current_medications: &'static str,
}

const DEMO_PATIENTS: [DemoPatient; 3] = [
    DemoPatient {
        id: "1",
        case_number: "001-A",
        first_name: "James",
        last_name: "Wilson",
        date_of_birth: "1985-03-15",
        gender: Gender::Male,
        blood_type: "A+",
        phone: "+1-555-0101",
        email: "james.wilson@email.com",
        address: "123 Main St, New York, NY 10001",
        medical_history: "Hypertension, Type 2 Diabetes",
        allergies: "Penicillin",
        current_medications: "Metformin 500mg, Lisinopril 10mg",
    },
    DemoPatient {
        id: "2",
        case_number: "002-B",
        first_name: "Emily",
        last_name: "Davis",
        date_of_birth: "1992-07-22",
        gender: Gender::Female,
        blood_type: "O-",
        phone: "+1-555-0102",
        email: "emily.davis@email.com",
        address: "456 Oak Ave, Los Angeles, CA 90001",
        medical_history: "Asthma",
        allergies: "None",
        current_medications: "Albuterol inhaler as needed",
    },
    DemoPatient {
        id: "3",
        case_number: "003-C",
        first_name: "Michael",
        last_name: "Brown",
        date_of_birth: "1978-11-30",
        gender: Gender::Male,
        blood_type: "B+",
        phone: "+1-555-0103",
        email: "michael.brown@email.com",
        address: "789 Pine Rd, Chicago, IL 60601",
        medical_history: "Previous heart surgery (2019)",
        allergies: "Latex",
        current_medications: "Aspirin 81mg, Atorvastatin 20mg",
    },
];

/// Three patients assigned to the demo doctor and nurse.
pub fn demo_patients() -> Vec<Patient> {
    let now = Utc::now();
    DEMO_PATIENTS
        .iter()
        .map(|p| Patient {
            id: p.id.into(),
            case_number: p.case_number.into(),
            first_name: p.first_name.into(),
            last_name: p.last_name.into(),
            date_of_birth: p.date_of_birth.into(),
            gender: p.gender,
            blood_type: p.blood_type.into(),
            phone: p.phone.into(),
            email: p.email.into(),
            address: p.address.into(),
            medical_history: p.medical_history.into(),
            allergies: p.allergies.into(),
            current_medications: p.current_medications.into(),
            assigned_to: vec!["2".into(), "3".into()],
            created_at: now,
            updated_at: now,
        })
        .collect()
}
