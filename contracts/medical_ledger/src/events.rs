use crate::circuit_breaker::PauseScope;
use crate::{AppointmentStatus, RecordKind, Role};
use soroban_sdk::{symbol_short, Address, Env, String};

/// Event published when the contract is initialized.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub admin: Address,
    pub timestamp: u64,
}

/// Event published when a patient or doctor registers.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RegisteredEvent {
    pub principal: Address,
    pub role: Role,
    pub name: String,
    pub timestamp: u64,
}

/// Event published when an appointment is requested or decided.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AppointmentEvent {
    pub appointment_id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub status: AppointmentStatus,
    pub timestamp: u64,
}

/// Event published when a record entry is appended.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordAddedEvent {
    pub record_id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub kind: RecordKind,
    pub timestamp: u64,
}

pub fn publish_initialized(env: &Env, admin: Address) {
    let topics = (symbol_short!("INIT"),);
    let data = InitializedEvent {
        admin,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

/// Publishes `PAT_REG` or `DOC_REG` depending on the role.
pub fn publish_registered(env: &Env, principal: Address, role: Role, name: String) {
    let topic = match role {
        Role::Patient => symbol_short!("PAT_REG"),
        Role::Doctor => symbol_short!("DOC_REG"),
    };
    let data = RegisteredEvent {
        principal: principal.clone(),
        role,
        name,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((topic, principal), data);
}

pub fn publish_metadata_updated(env: &Env, principal: Address, metadata_ref: String) {
    env.events()
        .publish((symbol_short!("META_UPD"), principal), metadata_ref);
}

/// Publishes `APT_REQ`, `APT_APR` or `APT_REJ` for the appointment's status.
pub fn publish_appointment(
    env: &Env,
    appointment_id: u64,
    patient: Address,
    doctor: Address,
    status: AppointmentStatus,
) {
    let topic = match status {
        AppointmentStatus::Requested => symbol_short!("APT_REQ"),
        AppointmentStatus::Approved => symbol_short!("APT_APR"),
        AppointmentStatus::Rejected => symbol_short!("APT_REJ"),
    };
    let data = AppointmentEvent {
        appointment_id,
        patient: patient.clone(),
        doctor: doctor.clone(),
        status,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish((topic, patient, doctor), data);
}

pub fn publish_access_requested(env: &Env, patient: Address, doctor: Address) {
    env.events().publish(
        (symbol_short!("ACC_REQ"), patient, doctor),
        env.ledger().timestamp(),
    );
}

pub fn publish_access_granted(env: &Env, patient: Address, doctor: Address) {
    env.events().publish(
        (symbol_short!("ACC_GRT"), patient, doctor),
        env.ledger().timestamp(),
    );
}

pub fn publish_access_revoked(env: &Env, patient: Address, doctor: Address) {
    env.events().publish(
        (symbol_short!("ACC_REV"), patient, doctor),
        env.ledger().timestamp(),
    );
}

pub fn publish_record_added(
    env: &Env,
    record_id: u64,
    patient: Address,
    doctor: Address,
    kind: RecordKind,
) {
    let topics = (symbol_short!("REC_ADD"), patient.clone(), doctor.clone());
    let data = RecordAddedEvent {
        record_id,
        patient,
        doctor,
        kind,
        timestamp: env.ledger().timestamp(),
    };
    env.events().publish(topics, data);
}

pub fn publish_contract_paused(env: &Env, caller: Address, scope: PauseScope) {
    env.events()
        .publish((symbol_short!("PAUSED"), caller), scope);
}

pub fn publish_contract_resumed(env: &Env, caller: Address, scope: PauseScope) {
    env.events()
        .publish((symbol_short!("RESUMED"), caller), scope);
}
