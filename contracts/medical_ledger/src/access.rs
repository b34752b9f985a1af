use crate::{ContractError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ──────────────────────────────────────────────
const ACCESS: Symbol = symbol_short!("ACCESS");
const ACC_PAT: Symbol = symbol_short!("ACC_PAT");
const ACC_DOC: Symbol = symbol_short!("ACC_DOC");

/// Extends the time-to-live (TTL) for an access grant storage key.
fn extend_ttl_access_key(env: &Env, key: &(Symbol, Address, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_index_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Types ─────────────────────────────────────────────────────

/// State of a (patient, doctor) relationship. A missing grant means the
/// doctor never asked.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum AccessState {
    Requested = 1,
    Granted = 2,
    Revoked = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccessGrant {
    pub patient: Address,
    pub doctor: Address,
    pub state: AccessState,
    pub requested_at: u64,
    pub granted_at: Option<u64>,
    pub revoked_at: Option<u64>,
}

impl AccessGrant {
    /// Doctor asks (again). Re-asking while pending or granted changes
    /// nothing; asking after a revocation reopens the request.
    pub fn request(&mut self, now: u64) -> bool {
        match self.state {
            AccessState::Requested | AccessState::Granted => false,
            AccessState::Revoked => {
                self.state = AccessState::Requested;
                self.requested_at = now;
                self.granted_at = None;
                self.revoked_at = None;
                true
            }
        }
    }

    /// Patient approves a pending request. Already granted is a no-op.
    pub fn grant(&mut self, now: u64) -> Result<bool, ContractError> {
        match self.state {
            AccessState::Requested => {
                self.state = AccessState::Granted;
                self.granted_at = Some(now);
                Ok(true)
            }
            AccessState::Granted => Ok(false),
            AccessState::Revoked => Err(ContractError::NoPendingRequest),
        }
    }

    /// Patient withdraws a grant or declines a pending request.
    pub fn revoke(&mut self, now: u64) -> Result<(), ContractError> {
        match self.state {
            AccessState::Requested | AccessState::Granted => {
                self.state = AccessState::Revoked;
                self.revoked_at = Some(now);
                Ok(())
            }
            AccessState::Revoked => Err(ContractError::InvalidTransition),
        }
    }
}

// ── Storage Functions ────────────────────────────────────────

fn grant_key(patient: &Address, doctor: &Address) -> (Symbol, Address, Address) {
    (ACCESS, patient.clone(), doctor.clone())
}

pub fn get_grant(env: &Env, patient: &Address, doctor: &Address) -> Option<AccessGrant> {
    env.storage().persistent().get(&grant_key(patient, doctor))
}

pub fn set_grant(env: &Env, grant: &AccessGrant) {
    let key = grant_key(&grant.patient, &grant.doctor);
    env.storage().persistent().set(&key, grant);
    extend_ttl_access_key(env, &key);
}

fn push_index(env: &Env, key: (Symbol, Address), member: &Address) {
    let mut members: Vec<Address> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));
    members.push_back(member.clone());
    env.storage().persistent().set(&key, &members);
    extend_ttl_index_key(env, &key);
}

/// Records a new (patient, doctor) pair in both lookup indexes. Called once,
/// when the pair's first request is created.
pub fn index_pair(env: &Env, patient: &Address, doctor: &Address) {
    push_index(env, (ACC_PAT, patient.clone()), doctor);
    push_index(env, (ACC_DOC, doctor.clone()), patient);
}

/// Every doctor that ever asked `patient`, in first-request order.
pub fn doctors_for_patient(env: &Env, patient: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&(ACC_PAT, patient.clone()))
        .unwrap_or(Vec::new(env))
}

/// Every patient `doctor` ever asked, in first-request order.
pub fn patients_for_doctor(env: &Env, doctor: &Address) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&(ACC_DOC, doctor.clone()))
        .unwrap_or(Vec::new(env))
}

pub fn has_access(env: &Env, patient: &Address, doctor: &Address) -> bool {
    matches!(
        get_grant(env, patient, doctor),
        Some(AccessGrant {
            state: AccessState::Granted,
            ..
        })
    )
}

/// Doctors whose request to `patient` is still pending.
pub fn pending_for_patient(env: &Env, patient: &Address) -> Vec<Address> {
    let mut pending = Vec::new(env);
    for doctor in doctors_for_patient(env, patient).iter() {
        if let Some(grant) = get_grant(env, patient, &doctor) {
            if grant.state == AccessState::Requested {
                pending.push_back(doctor);
            }
        }
    }
    pending
}

/// Patients `doctor` currently holds granted access to.
pub fn granted_for_doctor(env: &Env, doctor: &Address) -> Vec<Address> {
    let mut granted = Vec::new(env);
    for patient in patients_for_doctor(env, doctor).iter() {
        if has_access(env, &patient, doctor) {
            granted.push_back(patient);
        }
    }
    granted
}
