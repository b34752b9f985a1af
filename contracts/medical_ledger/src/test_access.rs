use crate::{
    AccessState, ContractError, DoctorFields, MedicalLedgerContract, MedicalLedgerContractClient,
    PatientFields, RecordBody, RecordKind,
};
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

const META: &str = "bafkreihx2gpep7gtdx5efctph3yhm6qxaykt6gglwjo5rarbnqi6selbrq";
const PRESCRIPTION: &str = "bafkreickvesev2l64cthbgh77qni37zraeka4n5q6tfuwzypnixfnrudne";
const LAB_REPORT: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

struct Fixture {
    env: Env,
    client: MedicalLedgerContractClient<'static>,
    patient: Address,
    doctor: Address,
}

fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MedicalLedgerContract, ());
    let client = MedicalLedgerContractClient::new(&env, &contract_id);
    client.initialize(&Address::generate(&env));

    let patient = Address::generate(&env);
    let doctor = Address::generate(&env);
    client.register_patient(
        &patient,
        &PatientFields {
            name: String::from_str(&env, "Ada"),
            age: 34,
            gender: String::from_str(&env, ""),
            id_type: String::from_str(&env, "passport"),
            id_number: String::from_str(&env, "X1234567"),
            metadata_ref: String::from_str(&env, META),
        },
    );
    client.register_doctor(&doctor, &doctor_fields(&env, "Dr. Grey"));

    Fixture { env, client, patient, doctor }
}

fn doctor_fields(env: &Env, name: &str) -> DoctorFields {
    DoctorFields {
        name: String::from_str(env, name),
        specialization: String::from_str(env, "oncology"),
        experience: 8,
        license_number: String::from_str(env, "LIC-7"),
        metadata_ref: String::from_str(env, META),
    }
}

fn granted(f: &Fixture) {
    f.client.request_access(&f.doctor, &f.patient);
    f.client.grant_access(&f.patient, &f.doctor, &f.patient);
}

// ── Access Grant Ledger ──────────────────────────────────────────────────────

#[test]
fn test_request_then_grant() {
    let f = setup();

    assert_eq!(f.client.get_access_state(&f.patient, &f.doctor), None);
    assert_eq!(f.client.request_access(&f.doctor, &f.patient), AccessState::Requested);
    assert!(!f.client.has_access(&f.patient, &f.doctor));
    assert_eq!(f.client.list_pending_for_patient(&f.patient).len(), 1);

    f.client.grant_access(&f.patient, &f.doctor, &f.patient);
    assert!(f.client.has_access(&f.patient, &f.doctor));
    assert_eq!(f.client.get_access_state(&f.patient, &f.doctor), Some(AccessState::Granted));
    assert_eq!(f.client.list_pending_for_patient(&f.patient).len(), 0);
    assert_eq!(f.client.list_patients_for_doctor(&f.doctor).len(), 1);
}

#[test]
fn test_re_request_is_noop() {
    let f = setup();
    f.client.request_access(&f.doctor, &f.patient);
    f.client.request_access(&f.doctor, &f.patient);
    assert_eq!(f.client.list_pending_for_patient(&f.patient).len(), 1);

    f.client.grant_access(&f.patient, &f.doctor, &f.patient);
    assert_eq!(f.client.request_access(&f.doctor, &f.patient), AccessState::Granted);
    assert!(f.client.has_access(&f.patient, &f.doctor));
}

#[test]
fn test_grant_twice_is_noop() {
    let f = setup();
    granted(&f);
    f.client.grant_access(&f.patient, &f.doctor, &f.patient);
    assert!(f.client.has_access(&f.patient, &f.doctor));
}

#[test]
fn test_request_access_from_patient_is_unknown_party() {
    let f = setup();
    let result = f.client.try_request_access(&f.patient, &f.doctor);
    assert_eq!(result, Err(Ok(ContractError::UnknownParty)));
}

#[test]
fn test_unsolicited_grant_is_refused() {
    let f = setup();
    let result = f.client.try_grant_access(&f.patient, &f.doctor, &f.patient);
    assert_eq!(result, Err(Ok(ContractError::NoPendingRequest)));
    assert!(!f.client.has_access(&f.patient, &f.doctor));
}

#[test]
fn test_grant_by_someone_else_is_unauthorized() {
    let f = setup();
    f.client.request_access(&f.doctor, &f.patient);

    let result = f.client.try_grant_access(&f.patient, &f.doctor, &f.doctor);
    assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
    assert_eq!(f.client.get_access_state(&f.patient, &f.doctor), Some(AccessState::Requested));
}

#[test]
fn test_revoke_blocks_writes_and_keeps_history() {
    let f = setup();
    granted(&f);
    f.client.add_treatment_note(&f.patient, &f.doctor, &String::from_str(&f.env, "baseline"));

    f.client.revoke_access(&f.patient, &f.doctor, &f.patient);
    assert!(!f.client.has_access(&f.patient, &f.doctor));
    assert_eq!(f.client.list_patients_for_doctor(&f.doctor).len(), 0);

    let result = f.client.try_add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "after revoke"),
    );
    assert_eq!(result, Err(Ok(ContractError::AccessDenied)));
    assert_eq!(f.client.list_treatments(&f.patient, &f.patient).len(), 1);
}

#[test]
fn test_revoked_grant_needs_a_new_request() {
    let f = setup();
    granted(&f);
    f.client.revoke_access(&f.patient, &f.doctor, &f.patient);

    let result = f.client.try_grant_access(&f.patient, &f.doctor, &f.patient);
    assert_eq!(result, Err(Ok(ContractError::NoPendingRequest)));

    assert_eq!(f.client.request_access(&f.doctor, &f.patient), AccessState::Requested);
    f.client.grant_access(&f.patient, &f.doctor, &f.patient);
    assert!(f.client.has_access(&f.patient, &f.doctor));
}

#[test]
fn test_revoke_without_relationship() {
    let f = setup();
    let result = f.client.try_revoke_access(&f.patient, &f.doctor, &f.patient);
    assert_eq!(result, Err(Ok(ContractError::InvalidTransition)));

    f.client.request_access(&f.doctor, &f.patient);
    f.client.revoke_access(&f.patient, &f.doctor, &f.patient);
    let result = f.client.try_revoke_access(&f.patient, &f.doctor, &f.patient);
    assert_eq!(result, Err(Ok(ContractError::InvalidTransition)));
}

// ── Medical Record Ledger ────────────────────────────────────────────────────

#[test]
fn test_write_without_grant_is_denied() {
    let f = setup();
    f.client.request_access(&f.doctor, &f.patient);

    let result = f.client.try_add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "note"),
    );
    assert_eq!(result, Err(Ok(ContractError::AccessDenied)));
    let result = f.client.try_add_prescription(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, PRESCRIPTION),
    );
    assert_eq!(result, Err(Ok(ContractError::AccessDenied)));
    assert_eq!(f.client.get_record_count(), 0);
}

#[test]
fn test_access_checked_before_payload() {
    let f = setup();
    let result = f.client.try_add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "  "),
    );
    assert_eq!(result, Err(Ok(ContractError::AccessDenied)));
}

#[test]
fn test_blank_note_is_rejected() {
    let f = setup();
    granted(&f);
    let result = f.client.try_add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, " \t\n"),
    );
    assert_eq!(result, Err(Ok(ContractError::EmptyNote)));
    let result = f.client.try_add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, ""),
    );
    assert_eq!(result, Err(Ok(ContractError::EmptyNote)));
}

#[test]
fn test_unicode_whitespace_note_is_rejected() {
    let f = setup();
    granted(&f);
    let result = f.client.try_add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "\u{00a0}\u{3000}\u{2003}"),
    );
    assert_eq!(result, Err(Ok(ContractError::EmptyNote)));
    assert_eq!(f.client.get_record_count(), 0);
}

#[test]
fn test_invalid_reference_is_rejected() {
    let f = setup();
    granted(&f);
    let result = f.client.try_add_doctor_file(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "local_1712_x"),
    );
    assert_eq!(result, Err(Ok(ContractError::InvalidReference)));
}

#[test]
fn test_entries_get_increasing_sequence() {
    let f = setup();
    granted(&f);
    f.env.ledger().set_timestamp(1_000);
    let first = f.client.add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "one"),
    );
    f.env.ledger().set_timestamp(2_000);
    let second = f.client.add_treatment_note(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, "two"),
    );
    let file = f.client.add_doctor_file(
        &f.patient,
        &f.doctor,
        &String::from_str(&f.env, LAB_REPORT),
    );

    assert_eq!(first.sequence, 1);
    assert_eq!(second.sequence, 2);
    assert_eq!(file.sequence, 1);
    assert_eq!(first.recorded_at, 1_000);
    assert_eq!(second.recorded_at, 2_000);
    assert!(second.id > first.id);
    assert_eq!(file.kind, RecordKind::DoctorFile);
    assert_eq!(file.body, RecordBody::Content(String::from_str(&f.env, LAB_REPORT)));
}

#[test]
fn test_read_views_join_current_doctor_name() {
    let f = setup();
    granted(&f);
    f.client.add_prescription(&f.patient, &f.doctor, &String::from_str(&f.env, PRESCRIPTION));

    let views = f.client.list_prescriptions(&f.patient, &f.patient);
    assert_eq!(views.len(), 1);
    let view = views.get(0).unwrap();
    assert_eq!(view.doctor_name, String::from_str(&f.env, "Dr. Grey"));
    assert_eq!(view.entry.doctor, f.doctor);
}

#[test]
fn test_stranger_cannot_read() {
    let f = setup();
    let stranger = Address::generate(&f.env);
    let result = f.client.try_list_treatments(&stranger, &f.patient);
    assert_eq!(result, Err(Ok(ContractError::AccessDenied)));
}

#[test]
fn test_unknown_patient_read_is_unknown_party() {
    let f = setup();
    let result = f.client.try_list_treatments(&f.doctor, &f.doctor);
    assert_eq!(result, Err(Ok(ContractError::UnknownParty)));
}
