use medical_ledger::{
    DoctorFields, MedicalLedgerContract, MedicalLedgerContractClient, PatientFields,
};
use soroban_sdk::testutils::Address as _;
use soroban_sdk::{Address, Env, String};

const META: &str = "bafkreihx2gpep7gtdx5efctph3yhm6qxaykt6gglwjo5rarbnqi6selbrq";

pub fn setup() -> (Env, MedicalLedgerContractClient<'static>) {
    let env = Env::default();
    env.mock_all_auths();

    let contract_id = env.register(MedicalLedgerContract, ());
    let client = MedicalLedgerContractClient::new(&env, &contract_id);
    client.initialize(&Address::generate(&env));

    (env, client)
}

pub fn patient(env: &Env, client: &MedicalLedgerContractClient) -> Address {
    let principal = Address::generate(env);
    client.register_patient(
        &principal,
        &PatientFields {
            name: String::from_str(env, "Patient"),
            age: 50,
            gender: String::from_str(env, ""),
            id_type: String::from_str(env, "passport"),
            id_number: String::from_str(env, "P-1"),
            metadata_ref: String::from_str(env, META),
        },
    );
    principal
}

pub fn doctor(env: &Env, client: &MedicalLedgerContractClient) -> Address {
    let principal = Address::generate(env);
    client.register_doctor(
        &principal,
        &DoctorFields {
            name: String::from_str(env, "Doctor"),
            specialization: String::from_str(env, "radiology"),
            experience: 3,
            license_number: String::from_str(env, "R-9"),
            metadata_ref: String::from_str(env, META),
        },
    );
    principal
}
