use crate::{
    circuit_breaker, ContractError, MedicalLedgerContract, MedicalLedgerContractClient,
    PatientFields, PauseScope,
};
use soroban_sdk::{testutils::Address as _, Address, Env, String};

fn setup() -> (Env, MedicalLedgerContractClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MedicalLedgerContract, ());
    let client = MedicalLedgerContractClient::new(&env, &contract_id);
    let admin = Address::generate(&env);
    client.initialize(&admin);
    (env, client, admin)
}

fn fields(env: &Env) -> PatientFields {
    PatientFields {
        name: String::from_str(env, "Ada"),
        age: 40,
        gender: String::from_str(env, "f"),
        id_type: String::from_str(env, "national"),
        id_number: String::from_str(env, "N-1"),
        metadata_ref: String::from_str(env, "QmYwAPJzv5CZsnA625s3Xf2nemtYgPpHdWEz79ojWnPbdG"),
    }
}

#[test]
fn test_global_pause_blocks_mutations() {
    let (env, client, admin) = setup();
    client.pause(&admin, &PauseScope::Global);
    assert!(client.is_paused(&PauseScope::Global));

    let patient = Address::generate(&env);
    let result = client.try_register_patient(&patient, &fields(&env));
    assert_eq!(result, Err(Ok(ContractError::Paused)));

    client.resume(&admin, &PauseScope::Global);
    client.register_patient(&patient, &fields(&env));
}

#[test]
fn test_function_pause_is_scoped() {
    let (env, client, admin) = setup();
    let scope = PauseScope::Function(circuit_breaker::APPOINTMENTS);
    client.pause(&admin, &scope);

    let patient = Address::generate(&env);
    client.register_patient(&patient, &fields(&env));
    assert!(client.is_paused(&scope));
    assert!(!client.is_paused(&PauseScope::Global));

    let result = client.try_request_appointment(&patient, &Address::generate(&env), &0, &900);
    assert_eq!(result, Err(Ok(ContractError::Paused)));
}

#[test]
fn test_reads_are_not_paused() {
    let (env, client, admin) = setup();
    let patient = Address::generate(&env);
    client.register_patient(&patient, &fields(&env));
    client.pause(&admin, &PauseScope::Global);

    assert_eq!(client.get_counts(), (1, 0));
    assert_eq!(client.list_treatments(&patient, &patient).len(), 0);
}

#[test]
fn test_pause_by_non_admin_is_unauthorized() {
    let (env, client, _admin) = setup();
    let intruder = Address::generate(&env);
    let result = client.try_pause(&intruder, &PauseScope::Global);
    assert_eq!(result, Err(Ok(ContractError::Unauthorized)));
}

#[test]
fn test_pause_before_initialize() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MedicalLedgerContract, ());
    let client = MedicalLedgerContractClient::new(&env, &contract_id);

    let result = client.try_pause(&Address::generate(&env), &PauseScope::Global);
    assert_eq!(result, Err(Ok(ContractError::NotInitialized)));
}

#[test]
fn test_error_classification() {
    use crate::{ErrorCategory, ErrorSeverity};

    assert_eq!(ContractError::AccessDenied.category(), ErrorCategory::Authorization);
    assert_eq!(ContractError::EmptyNote.category(), ErrorCategory::Validation);
    assert_eq!(ContractError::AlreadyFinalized.category(), ErrorCategory::StateConflict);
    assert_eq!(ContractError::Paused.severity(), ErrorSeverity::High);
    assert!(ContractError::Paused.retryable());
    assert!(!ContractError::AccessDenied.retryable());
}
