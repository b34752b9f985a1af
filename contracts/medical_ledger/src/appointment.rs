use crate::{ContractError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ──────────────────────────────────────────────
const APPT_CTR: Symbol = symbol_short!("APPT_CTR");
const APPT: Symbol = symbol_short!("APPT");
const APPT_PAT: Symbol = symbol_short!("APPT_PAT");
const APPT_DOC: Symbol = symbol_short!("APPT_DOC");

/// Extends the time-to-live (TTL) for appointment storage keys.
fn extend_ttl_appointment_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) for per-party appointment indexes.
fn extend_ttl_index_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Types ─────────────────────────────────────────────────────

/// Status of an appointment. Discriminants match the legacy status indices.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AppointmentStatus {
    Requested = 0,
    Approved = 1,
    Rejected = 2,
}

impl AppointmentStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, AppointmentStatus::Requested)
    }

    /// Applies a doctor's decision. `Requested` is the only non-terminal
    /// state, so every transition leaves it.
    pub fn transition(&self, next: AppointmentStatus) -> Result<AppointmentStatus, ContractError> {
        if self.is_terminal() {
            return Err(ContractError::AlreadyFinalized);
        }
        if !next.is_terminal() {
            return Err(ContractError::InvalidTransition);
        }
        Ok(next)
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Appointment {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    /// UNIX seconds of the requested day.
    pub date: u64,
    /// Requested time as HHMM.
    pub time: u32,
    pub status: AppointmentStatus,
    pub created_at: u64,
    pub decided_at: Option<u64>,
}

// ── Storage Functions ────────────────────────────────────────

/// Increments and returns the next appointment ID
pub fn next_appointment_id(env: &Env) -> u64 {
    let current: u64 = env.storage().instance().get(&APPT_CTR).unwrap_or(0);
    let next = current.saturating_add(1);
    env.storage().instance().set(&APPT_CTR, &next);
    next
}

pub fn set_appointment(env: &Env, appointment: &Appointment) {
    let key = (APPT, appointment.id);
    env.storage().persistent().set(&key, appointment);
    extend_ttl_appointment_key(env, &key);
}

pub fn get_appointment(env: &Env, appointment_id: u64) -> Option<Appointment> {
    env.storage().persistent().get(&(APPT, appointment_id))
}

fn push_index(env: &Env, key: (Symbol, Address), appointment_id: u64) {
    let mut ids: Vec<u64> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));
    ids.push_back(appointment_id);
    env.storage().persistent().set(&key, &ids);
    extend_ttl_index_key(env, &key);
}

/// Indexes a freshly created appointment under both parties.
pub fn index_appointment(env: &Env, appointment: &Appointment) {
    push_index(env, (APPT_PAT, appointment.patient.clone()), appointment.id);
    push_index(env, (APPT_DOC, appointment.doctor.clone()), appointment.id);
}

fn load_all(env: &Env, ids: Vec<u64>) -> Vec<Appointment> {
    let mut appointments = Vec::new(env);
    for id in ids.iter() {
        if let Some(appointment) = get_appointment(env, id) {
            appointments.push_back(appointment);
        }
    }
    appointments
}

/// Appointments requested by `patient`, in request order.
pub fn for_patient(env: &Env, patient: &Address) -> Vec<Appointment> {
    let ids = env
        .storage()
        .persistent()
        .get(&(APPT_PAT, patient.clone()))
        .unwrap_or(Vec::new(env));
    load_all(env, ids)
}

/// Appointments addressed to `doctor`, in request order.
pub fn for_doctor(env: &Env, doctor: &Address) -> Vec<Appointment> {
    let ids = env
        .storage()
        .persistent()
        .get(&(APPT_DOC, doctor.clone()))
        .unwrap_or(Vec::new(env));
    load_all(env, ids)
}
