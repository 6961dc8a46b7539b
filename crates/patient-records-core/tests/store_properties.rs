//! Property tests for the record store.

use patient_records_core::store::{case_number_prefix, demo_patients, keys};
use patient_records_core::{
    KeyValueStorage, MemoryStorage, NewPatient, Patient, PatientUpdate, RecordStore, Gender,
};
use proptest::prelude::*;

fn patients_with(cases_and_teams: &[(String, Vec<String>)]) -> Vec<Patient> {
    let template = demo_patients().remove(0);
    cases_and_teams
        .iter()
        .enumerate()
        .map(|(i, (case_number, team))| Patient {
            id: format!("p{}", i),
            case_number: case_number.clone(),
            assigned_to: team.clone(),
            ..template.clone()
        })
        .collect()
}

fn store_with(patients: &[Patient]) -> RecordStore<MemoryStorage> {
    let mut storage = MemoryStorage::new();
    storage
        .set_item(keys::PATIENTS, &serde_json::to_string(patients).unwrap())
        .unwrap();
    RecordStore::open(storage).unwrap()
}

fn intake() -> NewPatient {
    NewPatient {
        first_name: "A".into(),
        last_name: "B".into(),
        date_of_birth: "2001-02-03".into(),
        gender: Gender::Female,
        blood_type: String::new(),
        phone: String::new(),
        email: String::new(),
        address: String::new(),
        medical_history: String::new(),
        allergies: String::new(),
        current_medications: String::new(),
        assigned_to: Vec::new(),
    }
}

fn case_number_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        (0u64..5000, "[A-Z]").prop_map(|(n, l)| format!("{:03}-{}", n, l)),
        Just(String::new()),
        "[a-z]{1,4}-[A-Z]",
    ]
}

fn team_strategy() -> impl Strategy<Value = Vec<String>> {
    proptest::sample::subsequence(vec!["u1", "u2", "u3"], 0..=3)
        .prop_map(|ids| ids.into_iter().map(String::from).collect())
}

proptest! {
    #[test]
    fn created_case_number_exceeds_all_prior_prefixes(
        cases in proptest::collection::vec(case_number_strategy(), 0..20)
    ) {
        let rows: Vec<(String, Vec<String>)> = cases.into_iter().map(|c| (c, vec![])).collect();
        let existing = patients_with(&rows);
        let mut store = store_with(&existing);

        let created = store.create_patient(intake()).unwrap();
        let prefix = case_number_prefix(&created.case_number).unwrap();
        let prior_max = existing
            .iter()
            .filter_map(|p| case_number_prefix(&p.case_number))
            .max();

        match prior_max {
            Some(max) => prop_assert_eq!(prefix, max + 1),
            None => prop_assert_eq!(prefix, 1),
        }
        let letter = created.case_number.chars().last().unwrap();
        prop_assert!(letter.is_ascii_uppercase());
    }

    #[test]
    fn assigned_user_query_is_ordered_subset(
        teams in proptest::collection::vec(team_strategy(), 0..15),
        user in prop_oneof![Just("u1"), Just("u2"), Just("u3"), Just("nobody")],
    ) {
        let rows: Vec<(String, Vec<String>)> =
            teams.into_iter().map(|t| ("001-A".to_string(), t)).collect();
        let patients = patients_with(&rows);
        let store = store_with(&patients);

        let expected: Vec<String> = patients
            .iter()
            .filter(|p| p.assigned_to.iter().any(|id| id == user))
            .map(|p| p.id.clone())
            .collect();
        let actual: Vec<String> = store
            .get_patients_by_assigned_user(user)
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn partial_update_merges_over_prior_record(
        phone in proptest::option::of("[0-9+-]{0,12}"),
        allergies in proptest::option::of("[a-zA-Z ,]{0,20}"),
        last_name in proptest::option::of("[A-Z][a-z]{0,10}"),
        team in proptest::option::of(team_strategy()),
    ) {
        let mut store = RecordStore::open(MemoryStorage::new()).unwrap();
        let before = store.get_patient_by_id("1").unwrap().unwrap();

        let update = PatientUpdate {
            phone: phone.clone(),
            allergies: allergies.clone(),
            last_name: last_name.clone(),
            assigned_to: team.clone(),
            ..Default::default()
        };
        let after = store.update_patient("1", update).unwrap().unwrap();

        prop_assert_eq!(&after.phone, phone.as_ref().unwrap_or(&before.phone));
        prop_assert_eq!(&after.allergies, allergies.as_ref().unwrap_or(&before.allergies));
        prop_assert_eq!(&after.last_name, last_name.as_ref().unwrap_or(&before.last_name));
        prop_assert_eq!(&after.assigned_to, team.as_ref().unwrap_or(&before.assigned_to));
        prop_assert_eq!(&after.first_name, &before.first_name);
        prop_assert_eq!(&after.case_number, &before.case_number);
        prop_assert_eq!(after.created_at, before.created_at);
        prop_assert!(after.updated_at > before.updated_at);

        let stored = store.get_patient_by_id("1").unwrap().unwrap();
        prop_assert_eq!(stored, after);
    }
}
