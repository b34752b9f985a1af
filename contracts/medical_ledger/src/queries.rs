//! Read-model aggregations. Nothing here is stored; every value is derived
//! from current ledger state on each call.

use crate::access;
use crate::appointment::{self, Appointment, AppointmentStatus};
use crate::identity::{self, Role};
use crate::records::{self, ReadScope, RecordKind, RecordView};
use crate::ContractError;
use soroban_sdk::{contracttype, Address, Env, Vec};

/// Everything a reader may see about one patient.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PatientBundle {
    pub patient: Address,
    pub appointments: Vec<Appointment>,
    pub treatments: Vec<RecordView>,
    pub prescriptions: Vec<RecordView>,
    pub doctor_files: Vec<RecordView>,
    pub pending_access: Vec<Address>,
}

/// The patient reads everything; a doctor with granted access reads
/// everything; any other registered doctor reads only what they authored.
pub fn read_scope(
    env: &Env,
    caller: &Address,
    patient: &Address,
) -> Result<ReadScope, ContractError> {
    identity::require_patient(env, patient)?;
    if caller == patient {
        return Ok(ReadScope::All);
    }
    identity::require_doctor(env, caller).map_err(|_| ContractError::AccessDenied)?;
    if access::has_access(env, patient, caller) {
        Ok(ReadScope::All)
    } else {
        Ok(ReadScope::AuthoredBy(caller.clone()))
    }
}

pub fn counts(env: &Env) -> (u32, u32) {
    (
        identity::count(env, Role::Patient),
        identity::count(env, Role::Doctor),
    )
}

pub fn pending_appointment_count(env: &Env, doctor: &Address) -> u32 {
    let mut pending = 0u32;
    for appt in appointment::for_doctor(env, doctor).iter() {
        if appt.status == AppointmentStatus::Requested {
            pending = pending.saturating_add(1);
        }
    }
    pending
}

/// Distinct patients with at least one approved appointment with `doctor`.
pub fn approved_patient_count(env: &Env, doctor: &Address) -> u32 {
    let mut seen: Vec<Address> = Vec::new(env);
    for appt in appointment::for_doctor(env, doctor).iter() {
        if appt.status == AppointmentStatus::Approved && !seen.contains(&appt.patient) {
            seen.push_back(appt.patient);
        }
    }
    seen.len()
}

pub fn patient_bundle(
    env: &Env,
    caller: &Address,
    patient: &Address,
) -> Result<PatientBundle, ContractError> {
    let scope = read_scope(env, caller, patient)?;

    let mut appointments = Vec::new(env);
    for appt in appointment::for_patient(env, patient).iter() {
        if scope.admits(&appt.doctor) {
            appointments.push_back(appt);
        }
    }

    let mut pending_access = Vec::new(env);
    for doctor in access::pending_for_patient(env, patient).iter() {
        if scope.admits(&doctor) {
            pending_access.push_back(doctor);
        }
    }

    Ok(PatientBundle {
        patient: patient.clone(),
        appointments,
        treatments: records::views(env, patient, RecordKind::Treatment, &scope),
        prescriptions: records::views(env, patient, RecordKind::Prescription, &scope),
        doctor_files: records::views(env, patient, RecordKind::DoctorFile, &scope),
        pending_access,
    })
}
