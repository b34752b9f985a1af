#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use medical_ledger::{
    DoctorFields, MedicalLedgerContract, MedicalLedgerContractClient, PatientFields,
};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

const VALID_REF: &str = "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e";

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    RegisterPatient { name_len: u8 },
    RegisterDoctor { name_len: u8 },
    RequestAppointment { patient: u8, doctor: u8, time: u32 },
    Decide { id: u8, doctor: u8, approve: bool },
    RequestAccess { doctor: u8, patient: u8 },
    Grant { patient: u8, doctor: u8, actor: u8 },
    Revoke { patient: u8, doctor: u8 },
    AddNote { patient: u8, doctor: u8, blank: bool },
    AddFile { patient: u8, doctor: u8, ref_len: u8 },
}

fn pick(users: &[Address], i: u8) -> Option<&Address> {
    if users.is_empty() {
        None
    } else {
        Some(&users[i as usize % users.len()])
    }
}

fn name(env: &Env, len: u8) -> String {
    let s = "n".repeat((len as usize % 140) + 1);
    String::from_str(env, &s)
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    let admin = Address::generate(&env);

    let contract_id = env.register(MedicalLedgerContract, ());
    let client = MedicalLedgerContractClient::new(&env, &contract_id);
    let _ = client.try_initialize(&admin);

    let mut patients: Vec<Address> = Vec::new();
    let mut doctors: Vec<Address> = Vec::new();
    let mut everyone: Vec<Address> = vec![admin.clone()];

    for action in actions {
        match action {
            FuzzAction::RegisterPatient { name_len } => {
                let p = Address::generate(&env);
                let fields = PatientFields {
                    name: name(&env, name_len),
                    age: name_len as u32,
                    gender: String::from_str(&env, ""),
                    id_type: String::from_str(&env, "passport"),
                    id_number: String::from_str(&env, "F-1"),
                    metadata_ref: String::from_str(&env, VALID_REF),
                };
                if client.try_register_patient(&p, &fields).is_ok() {
                    patients.push(p.clone());
                }
                everyone.push(p);
            }
            FuzzAction::RegisterDoctor { name_len } => {
                let d = Address::generate(&env);
                let fields = DoctorFields {
                    name: name(&env, name_len),
                    specialization: String::from_str(&env, "general"),
                    experience: name_len as u32,
                    license_number: String::from_str(&env, "L-1"),
                    metadata_ref: String::from_str(&env, VALID_REF),
                };
                if client.try_register_doctor(&d, &fields).is_ok() {
                    doctors.push(d.clone());
                }
                everyone.push(d);
            }
            FuzzAction::RequestAppointment { patient, doctor, time } => {
                if let (Some(p), Some(d)) = (pick(&everyone, patient), pick(&everyone, doctor)) {
                    let _ = client.try_request_appointment(p, d, &0, &(time % 3000));
                }
            }
            FuzzAction::Decide { id, doctor, approve } => {
                if let Some(d) = pick(&everyone, doctor) {
                    let id = id as u64;
                    let before = client.try_get_appointment(&id);
                    let result = if approve {
                        client.try_approve_appointment(&id, d)
                    } else {
                        client.try_reject_appointment(&id, d)
                    };
                    // A decided appointment never accepts a second decision.
                    if let Ok(Ok(appt)) = before {
                        if appt.decided_at.is_some() {
                            assert!(result.is_err());
                        }
                    }
                }
            }
            FuzzAction::RequestAccess { doctor, patient } => {
                if let (Some(d), Some(p)) = (pick(&everyone, doctor), pick(&everyone, patient)) {
                    let _ = client.try_request_access(d, p);
                }
            }
            FuzzAction::Grant { patient, doctor, actor } => {
                if let (Some(p), Some(d), Some(a)) = (
                    pick(&patients, patient),
                    pick(&doctors, doctor),
                    pick(&everyone, actor),
                ) {
                    let _ = client.try_grant_access(p, d, a);
                }
            }
            FuzzAction::Revoke { patient, doctor } => {
                if let (Some(p), Some(d)) = (pick(&patients, patient), pick(&doctors, doctor)) {
                    let _ = client.try_revoke_access(p, d, p);
                }
            }
            FuzzAction::AddNote { patient, doctor, blank } => {
                if let (Some(p), Some(d)) = (pick(&everyone, patient), pick(&everyone, doctor)) {
                    let allowed = client.has_access(p, d);
                    let text = if blank { " " } else { "note" };
                    let result = client.try_add_treatment_note(p, d, &String::from_str(&env, text));
                    // Writes succeed exactly when access is granted and the note is non-blank.
                    assert_eq!(result.is_ok(), allowed && !blank);
                }
            }
            FuzzAction::AddFile { patient, doctor, ref_len } => {
                if let (Some(p), Some(d)) = (pick(&patients, patient), pick(&doctors, doctor)) {
                    let reference = if ref_len % 2 == 0 {
                        VALID_REF.to_string()
                    } else {
                        "b".repeat(ref_len as usize)
                    };
                    let _ = client.try_add_doctor_file(p, d, &String::from_str(&env, &reference));
                }
            }
        }
    }
});
