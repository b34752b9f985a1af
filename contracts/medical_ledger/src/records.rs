use crate::{identity, TTL_EXTEND_TO, TTL_THRESHOLD};
use soroban_sdk::{contracttype, symbol_short, Address, Env, String, Symbol, Vec};

// ── Storage keys ──────────────────────────────────────────────
const REC_CTR: Symbol = symbol_short!("REC_CTR");
const RECORD: Symbol = symbol_short!("RECORD");
const PAT_REC: Symbol = symbol_short!("PAT_REC");

fn extend_ttl_u64_key(env: &Env, key: &(Symbol, u64)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

fn extend_ttl_segment_key(env: &Env, key: &(Symbol, Address, RecordKind)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Types ─────────────────────────────────────────────────────

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum RecordKind {
    Treatment = 1,
    Prescription = 2,
    DoctorFile = 3,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordBody {
    /// Inline treatment note.
    Text(String),
    /// Content address of an uploaded document.
    Content(String),
}

/// Immutable entry in a patient's medical record.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordEntry {
    pub id: u64,
    pub patient: Address,
    pub doctor: Address,
    pub kind: RecordKind,
    pub body: RecordBody,
    /// 1-based position within the patient's entries of this kind.
    pub sequence: u32,
    pub recorded_at: u64,
}

/// A record entry joined with the authoring doctor's current name.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RecordView {
    pub entry: RecordEntry,
    pub doctor_name: String,
}

/// Which entries of a patient's record a reader may see.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ReadScope {
    All,
    AuthoredBy(Address),
}

impl ReadScope {
    pub fn admits(&self, author: &Address) -> bool {
        match self {
            ReadScope::All => true,
            ReadScope::AuthoredBy(doctor) => doctor == author,
        }
    }
}

// ── Storage Functions ────────────────────────────────────────

fn segment_key(patient: &Address, kind: RecordKind) -> (Symbol, Address, RecordKind) {
    (PAT_REC, patient.clone(), kind)
}

fn segment(env: &Env, patient: &Address, kind: RecordKind) -> Vec<u64> {
    env.storage()
        .persistent()
        .get(&segment_key(patient, kind))
        .unwrap_or(Vec::new(env))
}

pub fn get_entry(env: &Env, record_id: u64) -> Option<RecordEntry> {
    env.storage().persistent().get(&(RECORD, record_id))
}

/// Appends an entry to the patient's segment for `kind`. Callers must have
/// checked authorization and payload validity.
pub fn append(
    env: &Env,
    patient: &Address,
    doctor: &Address,
    kind: RecordKind,
    body: RecordBody,
) -> RecordEntry {
    let record_id: u64 = env
        .storage()
        .instance()
        .get(&REC_CTR)
        .unwrap_or(0u64)
        .saturating_add(1);
    env.storage().instance().set(&REC_CTR, &record_id);

    let seg_key = segment_key(patient, kind);
    let mut ids = segment(env, patient, kind);

    let entry = RecordEntry {
        id: record_id,
        patient: patient.clone(),
        doctor: doctor.clone(),
        kind,
        body,
        sequence: ids.len().saturating_add(1),
        recorded_at: env.ledger().timestamp(),
    };

    let key = (RECORD, record_id);
    env.storage().persistent().set(&key, &entry);
    extend_ttl_u64_key(env, &key);

    ids.push_back(record_id);
    env.storage().persistent().set(&seg_key, &ids);
    extend_ttl_segment_key(env, &seg_key);

    entry
}

/// Entries of `kind` for `patient` visible under `scope`, in append order,
/// each joined with the author's name as it reads now.
pub fn views(env: &Env, patient: &Address, kind: RecordKind, scope: &ReadScope) -> Vec<RecordView> {
    let mut out = Vec::new(env);
    for id in segment(env, patient, kind).iter() {
        if let Some(entry) = get_entry(env, id) {
            if !scope.admits(&entry.doctor) {
                continue;
            }
            let doctor_name = identity::display_name(env, &entry.doctor);
            out.push_back(RecordView { entry, doctor_name });
        }
    }
    out
}

pub fn total_entries(env: &Env) -> u64 {
    env.storage().instance().get(&REC_CTR).unwrap_or(0)
}
