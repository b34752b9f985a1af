#![allow(dead_code)]

use medical_ledger::{
    DoctorFields, MedicalLedgerContract, MedicalLedgerContractClient, PatientFields,
};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

/// CIDv1 (raw, sha2-256) of the bytes `hello world`.
pub const HELLO_CID: &str = "bafkreifzjut3te2nhyekklss27nh3k72ysco7y32koao5eei66wof36n5e";
pub const PRESCRIPTION_CID: &str = "bafkreickvesev2l64cthbgh77qni37zraeka4n5q6tfuwzypnixfnrudne";
pub const LAB_REPORT_CID: &str = "bafkreie4ydwjuqtg5i67cvg2esnicdznybqpkcmz5lk3h6ydcoxpryi6k4";
pub const PATIENT_META_CID: &str = "bafkreihx2gpep7gtdx5efctph3yhm6qxaykt6gglwjo5rarbnqi6selbrq";
pub const DOCTOR_META_CID: &str = "bafkreics7tguyrugvrr4mknjj72crdwmolov5pbrzrymm4mzfkgglokbzi";
pub const LEGACY_V0_CID: &str = "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG";

/// 2024-05-01T00:00:00Z
pub const MAY_FIRST: u64 = 1_714_521_600;

pub struct TestContext {
    pub env: Env,
    pub client: MedicalLedgerContractClient<'static>,
    pub admin: Address,
}

/// Creates a mocked Soroban environment, deploys the contract, and initializes admin.
pub fn setup_test_env() -> TestContext {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalLedgerContract, ());
    let client = MedicalLedgerContractClient::new(&env, &contract_id);

    let admin = Address::generate(&env);
    client.initialize(&admin);

    TestContext { env, client, admin }
}

pub fn create_patient(ctx: &TestContext, name: &str) -> Address {
    let patient = Address::generate(&ctx.env);
    let fields = PatientFields {
        name: String::from_str(&ctx.env, name),
        age: 30,
        gender: String::from_str(&ctx.env, "other"),
        id_type: String::from_str(&ctx.env, "passport"),
        id_number: String::from_str(&ctx.env, "P-000"),
        metadata_ref: String::from_str(&ctx.env, PATIENT_META_CID),
    };
    ctx.client.register_patient(&patient, &fields);
    patient
}

pub fn create_doctor(ctx: &TestContext, name: &str) -> Address {
    let doctor = Address::generate(&ctx.env);
    let fields = DoctorFields {
        name: String::from_str(&ctx.env, name),
        specialization: String::from_str(&ctx.env, "general practice"),
        experience: 5,
        license_number: String::from_str(&ctx.env, "GP-1"),
        metadata_ref: String::from_str(&ctx.env, DOCTOR_META_CID),
    };
    ctx.client.register_doctor(&doctor, &fields);
    doctor
}

/// Runs the request/grant handshake so `doctor` can write to `patient`.
pub fn grant(ctx: &TestContext, patient: &Address, doctor: &Address) {
    ctx.client.request_access(doctor, patient);
    ctx.client.grant_access(patient, doctor, patient);
}

pub fn text(ctx: &TestContext, value: &str) -> String {
    String::from_str(&ctx.env, value)
}
