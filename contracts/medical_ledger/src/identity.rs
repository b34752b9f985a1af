use crate::{validation, ContractError, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

// ── Storage keys ──────────────────────────────────────────────
const PROFILE: Symbol = symbol_short!("PROFILE");
const PAT_LIST: Symbol = symbol_short!("PAT_LIST");
const DOC_LIST: Symbol = symbol_short!("DOC_LIST");

fn extend_ttl_profile_key(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_list_key(env: &Env, key: &Symbol) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Types ─────────────────────────────────────────────────────

/// Role held by a registered principal. Assigned once at registration.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum Role {
    Patient = 1,
    Doctor = 2,
}

/// Ledger-committed patient fields supplied at registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientFields {
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub id_type: String,
    pub id_number: String,
    /// Content address of the patient's metadata document.
    pub metadata_ref: String,
}

/// Ledger-committed doctor fields supplied at registration.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorFields {
    pub name: String,
    pub specialization: String,
    pub experience: u32,
    pub license_number: String,
    /// Content address of the doctor's metadata document.
    pub metadata_ref: String,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientProfile {
    pub principal: Address,
    pub fields: PatientFields,
    pub registered_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DoctorProfile {
    pub principal: Address,
    pub fields: DoctorFields,
    pub registered_at: u64,
    pub updated_at: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Profile {
    Patient(PatientProfile),
    Doctor(DoctorProfile),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Patient(_) => Role::Patient,
            Profile::Doctor(_) => Role::Doctor,
        }
    }

    pub fn principal(&self) -> &Address {
        match self {
            Profile::Patient(p) => &p.principal,
            Profile::Doctor(d) => &d.principal,
        }
    }

    pub fn display_name(&self) -> &String {
        match self {
            Profile::Patient(p) => &p.fields.name,
            Profile::Doctor(d) => &d.fields.name,
        }
    }

    pub fn metadata_ref(&self) -> &String {
        match self {
            Profile::Patient(p) => &p.fields.metadata_ref,
            Profile::Doctor(d) => &d.fields.metadata_ref,
        }
    }
}

// ── Validation ───────────────────────────────────────────────

pub fn validate_patient_fields(fields: &PatientFields) -> Result<(), ContractError> {
    validation::validate_required(&fields.name)?;
    validation::validate_required(&fields.id_type)?;
    validation::validate_required(&fields.id_number)?;
    validation::validate_optional(&fields.gender)?;
    validation::validate_content_ref(&fields.metadata_ref)
        .map_err(|_| ContractError::InvalidFields)
}

pub fn validate_doctor_fields(fields: &DoctorFields) -> Result<(), ContractError> {
    validation::validate_required(&fields.name)?;
    validation::validate_required(&fields.specialization)?;
    validation::validate_required(&fields.license_number)?;
    validation::validate_content_ref(&fields.metadata_ref)
        .map_err(|_| ContractError::InvalidFields)
}

// ── Storage Functions ────────────────────────────────────────

fn profile_key(principal: &Address) -> (Symbol, Address) {
    (PROFILE, principal.clone())
}

fn directory_key(role: Role) -> Symbol {
    match role {
        Role::Patient => PAT_LIST,
        Role::Doctor => DOC_LIST,
    }
}

pub fn get_profile(env: &Env, principal: &Address) -> Option<Profile> {
    env.storage().persistent().get(&profile_key(principal))
}

pub fn is_registered(env: &Env, principal: &Address) -> bool {
    env.storage().persistent().has(&profile_key(principal))
}

/// Stores a profile. Does not touch the directory; see [`add_to_directory`].
pub fn set_profile(env: &Env, profile: &Profile) {
    let key = profile_key(profile.principal());
    env.storage().persistent().set(&key, profile);
    extend_ttl_profile_key(env, &key);
}

/// Appends a newly registered principal to its role's directory.
pub fn add_to_directory(env: &Env, role: Role, principal: &Address) {
    let key = directory_key(role);
    let mut members: Vec<Address> = env
        .storage()
        .persistent()
        .get(&key)
        .unwrap_or(Vec::new(env));
    members.push_back(principal.clone());
    env.storage().persistent().set(&key, &members);
    extend_ttl_list_key(env, &key);
}

/// Registered principals of `role` in registration order.
pub fn directory(env: &Env, role: Role) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&directory_key(role))
        .unwrap_or(Vec::new(env))
}

pub fn count(env: &Env, role: Role) -> u32 {
    directory(env, role).len()
}

/// Loads the profile of `principal`, requiring it to hold `role`.
pub fn require_role(env: &Env, principal: &Address, role: Role) -> Result<Profile, ContractError> {
    match get_profile(env, principal) {
        Some(profile) if profile.role() == role => Ok(profile),
        _ => Err(ContractError::UnknownParty),
    }
}

pub fn require_patient(env: &Env, principal: &Address) -> Result<PatientProfile, ContractError> {
    match require_role(env, principal, Role::Patient)? {
        Profile::Patient(p) => Ok(p),
        Profile::Doctor(_) => Err(ContractError::UnknownParty),
    }
}

pub fn require_doctor(env: &Env, principal: &Address) -> Result<DoctorProfile, ContractError> {
    match require_role(env, principal, Role::Doctor)? {
        Profile::Doctor(d) => Ok(d),
        Profile::Patient(_) => Err(ContractError::UnknownParty),
    }
}

/// Current display name of a principal; empty if it never registered.
pub fn display_name(env: &Env, principal: &Address) -> String {
    get_profile(env, principal)
        .map(|p| p.display_name().clone())
        .unwrap_or(String::from_str(env, ""))
}
