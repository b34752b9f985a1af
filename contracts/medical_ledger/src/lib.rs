#![no_std]

pub mod access;
pub mod appointment;
pub mod circuit_breaker;
pub mod errors;
pub mod events;
pub mod identity;
pub mod queries;
pub mod records;
pub mod validation;

use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, String, Symbol, Vec};

pub use access::{AccessGrant, AccessState};
pub use appointment::{Appointment, AppointmentStatus};
pub use circuit_breaker::PauseScope;
pub use errors::{ContractError, ErrorCategory, ErrorSeverity};
pub use identity::{DoctorFields, DoctorProfile, PatientFields, PatientProfile, Profile, Role};
pub use queries::PatientBundle;
pub use records::{RecordBody, RecordEntry, RecordKind, RecordView};

/// Storage keys for the contract
pub(crate) const ADMIN: Symbol = symbol_short!("ADMIN");
const INITIALIZED: Symbol = symbol_short!("INIT");

pub(crate) const TTL_THRESHOLD: u32 = 5184000;
pub(crate) const TTL_EXTEND_TO: u32 = 10368000;

#[contract]
pub struct MedicalLedgerContract;

#[contractimpl]
impl MedicalLedgerContract {
    // ======================== Administration ========================

    /// Initialize the contract with an admin address
    pub fn initialize(env: Env, admin: Address) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }

        admin.require_auth();

        env.storage().instance().set(&ADMIN, &admin);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage()
            .instance()
            .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);

        events::publish_initialized(&env, admin);

        Ok(())
    }

    /// Get the admin address
    pub fn get_admin(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&ADMIN)
            .ok_or(ContractError::NotInitialized)
    }

    /// Check if the contract is initialized
    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn pause(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::pause_contract(&env, &caller, scope)
    }

    pub fn resume(env: Env, caller: Address, scope: PauseScope) -> Result<(), ContractError> {
        caller.require_auth();
        circuit_breaker::resume_contract(&env, &caller, scope)
    }

    pub fn is_paused(env: Env, scope: PauseScope) -> bool {
        circuit_breaker::is_paused(&env, &scope)
    }

    /// Contract version
    pub fn version() -> u32 {
        1
    }

    // ======================== Identity Registry ========================

    /// Registers `patient` as a Patient. The principal authorizes its own
    /// registration and the role can never change afterwards.
    pub fn register_patient(
        env: Env,
        patient: Address,
        fields: PatientFields,
    ) -> Result<Address, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::REG_PATIENT)?;
        patient.require_auth();

        if identity::is_registered(&env, &patient) {
            return Err(ContractError::AlreadyRegistered);
        }
        identity::validate_patient_fields(&fields)?;

        let now = env.ledger().timestamp();
        let name = fields.name.clone();
        let profile = Profile::Patient(PatientProfile {
            principal: patient.clone(),
            fields,
            registered_at: now,
            updated_at: now,
        });
        identity::set_profile(&env, &profile);
        identity::add_to_directory(&env, Role::Patient, &patient);

        events::publish_registered(&env, patient.clone(), Role::Patient, name);

        Ok(patient)
    }

    /// Registers `doctor` as a Doctor.
    pub fn register_doctor(
        env: Env,
        doctor: Address,
        fields: DoctorFields,
    ) -> Result<Address, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::REG_DOCTOR)?;
        doctor.require_auth();

        if identity::is_registered(&env, &doctor) {
            return Err(ContractError::AlreadyRegistered);
        }
        identity::validate_doctor_fields(&fields)?;

        let now = env.ledger().timestamp();
        let name = fields.name.clone();
        let profile = Profile::Doctor(DoctorProfile {
            principal: doctor.clone(),
            fields,
            registered_at: now,
            updated_at: now,
        });
        identity::set_profile(&env, &profile);
        identity::add_to_directory(&env, Role::Doctor, &doctor);

        events::publish_registered(&env, doctor.clone(), Role::Doctor, name);

        Ok(doctor)
    }

    pub fn get_profile(env: Env, principal: Address) -> Result<Profile, ContractError> {
        identity::get_profile(&env, &principal).ok_or(ContractError::NotFound)
    }

    pub fn get_patient(env: Env, principal: Address) -> Result<PatientProfile, ContractError> {
        identity::require_patient(&env, &principal)
    }

    pub fn get_doctor(env: Env, principal: Address) -> Result<DoctorProfile, ContractError> {
        identity::require_doctor(&env, &principal)
    }

    /// Role held by `principal`, or `None` if it never registered.
    pub fn get_role(env: Env, principal: Address) -> Option<Role> {
        identity::get_profile(&env, &principal).map(|p| p.role())
    }

    /// Points the profile at a newly published metadata document. Only the
    /// owner may do this; appointments and record entries are unaffected.
    pub fn update_metadata_ref(
        env: Env,
        caller: Address,
        principal: Address,
        new_ref: String,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::UPDATE_META)?;
        caller.require_auth();

        if caller != principal {
            return Err(ContractError::Unauthorized);
        }
        let mut profile = identity::get_profile(&env, &principal).ok_or(ContractError::NotFound)?;
        validation::validate_content_ref(&new_ref)?;

        let now = env.ledger().timestamp();
        match &mut profile {
            Profile::Patient(p) => {
                p.fields.metadata_ref = new_ref.clone();
                p.updated_at = now;
            }
            Profile::Doctor(d) => {
                d.fields.metadata_ref = new_ref.clone();
                d.updated_at = now;
            }
        }
        identity::set_profile(&env, &profile);

        events::publish_metadata_updated(&env, principal, new_ref);

        Ok(())
    }

    /// Every profile holding `role`, in registration order.
    pub fn list_all(env: Env, role: Role) -> Vec<Profile> {
        let mut profiles = Vec::new(&env);
        for principal in identity::directory(&env, role).iter() {
            if let Some(profile) = identity::get_profile(&env, &principal) {
                profiles.push_back(profile);
            }
        }
        profiles
    }

    // ======================== Appointment Workflow ========================

    /// Creates a new appointment request. Identical requests are allowed and
    /// produce independent appointments.
    pub fn request_appointment(
        env: Env,
        patient: Address,
        doctor: Address,
        date: u64,
        time: u32,
    ) -> Result<u64, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::APPOINTMENTS)?;
        patient.require_auth();

        identity::require_patient(&env, &patient)?;
        identity::require_doctor(&env, &doctor)?;
        validation::validate_schedule(time)?;

        let appointment = Appointment {
            id: appointment::next_appointment_id(&env),
            patient: patient.clone(),
            doctor: doctor.clone(),
            date,
            time,
            status: AppointmentStatus::Requested,
            created_at: env.ledger().timestamp(),
            decided_at: None,
        };
        appointment::set_appointment(&env, &appointment);
        appointment::index_appointment(&env, &appointment);

        events::publish_appointment(
            &env,
            appointment.id,
            patient,
            doctor,
            AppointmentStatus::Requested,
        );

        Ok(appointment.id)
    }

    pub fn approve_appointment(
        env: Env,
        appointment_id: u64,
        acting_doctor: Address,
    ) -> Result<Appointment, ContractError> {
        Self::decide(&env, appointment_id, &acting_doctor, AppointmentStatus::Approved)
    }

    pub fn reject_appointment(
        env: Env,
        appointment_id: u64,
        acting_doctor: Address,
    ) -> Result<Appointment, ContractError> {
        Self::decide(&env, appointment_id, &acting_doctor, AppointmentStatus::Rejected)
    }

    pub fn get_appointment(env: Env, appointment_id: u64) -> Result<Appointment, ContractError> {
        appointment::get_appointment(&env, appointment_id).ok_or(ContractError::NotFound)
    }

    /// Public schedule listing. Appointments hold parties and slots only, never
    /// clinical content, so no read scope applies here.
    pub fn list_for_doctor(env: Env, doctor: Address) -> Vec<Appointment> {
        appointment::for_doctor(&env, &doctor)
    }

    pub fn list_for_patient(env: Env, patient: Address) -> Vec<Appointment> {
        appointment::for_patient(&env, &patient)
    }

    // ======================== Access Grant Ledger ========================

    /// Doctor asks `patient` for record access. Asking again while pending
    /// or granted is a no-op.
    pub fn request_access(
        env: Env,
        doctor: Address,
        patient: Address,
    ) -> Result<AccessState, ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::ACCESS)?;
        doctor.require_auth();

        identity::require_doctor(&env, &doctor)?;
        identity::require_patient(&env, &patient)?;

        let now = env.ledger().timestamp();
        match access::get_grant(&env, &patient, &doctor) {
            Some(mut grant) => {
                if grant.request(now) {
                    access::set_grant(&env, &grant);
                    events::publish_access_requested(&env, patient, doctor);
                }
                Ok(grant.state)
            }
            None => {
                let grant = AccessGrant {
                    patient: patient.clone(),
                    doctor: doctor.clone(),
                    state: AccessState::Requested,
                    requested_at: now,
                    granted_at: None,
                    revoked_at: None,
                };
                access::set_grant(&env, &grant);
                access::index_pair(&env, &patient, &doctor);
                events::publish_access_requested(&env, patient, doctor);
                Ok(AccessState::Requested)
            }
        }
    }

    /// Patient approves a pending request from `doctor`. Grants without a
    /// prior request are refused.
    pub fn grant_access(
        env: Env,
        patient: Address,
        doctor: Address,
        acting_patient: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::ACCESS)?;
        acting_patient.require_auth();

        if acting_patient != patient {
            return Err(ContractError::Unauthorized);
        }

        let mut grant =
            access::get_grant(&env, &patient, &doctor).ok_or(ContractError::NoPendingRequest)?;
        if grant.grant(env.ledger().timestamp())? {
            access::set_grant(&env, &grant);
            events::publish_access_granted(&env, patient, doctor);
        }

        Ok(())
    }

    /// Patient withdraws a grant or declines a pending request. Entries the
    /// doctor already wrote stay in the record.
    pub fn revoke_access(
        env: Env,
        patient: Address,
        doctor: Address,
        acting_patient: Address,
    ) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(&env, &circuit_breaker::ACCESS)?;
        acting_patient.require_auth();

        if acting_patient != patient {
            return Err(ContractError::Unauthorized);
        }

        let mut grant =
            access::get_grant(&env, &patient, &doctor).ok_or(ContractError::InvalidTransition)?;
        grant.revoke(env.ledger().timestamp())?;
        access::set_grant(&env, &grant);

        events::publish_access_revoked(&env, patient, doctor);

        Ok(())
    }

    pub fn has_access(env: Env, patient: Address, doctor: Address) -> bool {
        access::has_access(&env, &patient, &doctor)
    }

    pub fn get_access_state(env: Env, patient: Address, doctor: Address) -> Option<AccessState> {
        access::get_grant(&env, &patient, &doctor).map(|g| g.state)
    }

    pub fn list_pending_for_patient(env: Env, patient: Address) -> Vec<Address> {
        access::pending_for_patient(&env, &patient)
    }

    pub fn list_patients_for_doctor(env: Env, doctor: Address) -> Vec<Address> {
        access::granted_for_doctor(&env, &doctor)
    }

    // ======================== Medical Record Ledger ========================

    pub fn add_treatment_note(
        env: Env,
        patient: Address,
        doctor: Address,
        text: String,
    ) -> Result<RecordEntry, ContractError> {
        Self::require_writer(&env, &patient, &doctor)?;
        validation::validate_note(&text)?;
        Ok(Self::append(&env, &patient, &doctor, RecordKind::Treatment, RecordBody::Text(text)))
    }

    pub fn add_prescription(
        env: Env,
        patient: Address,
        doctor: Address,
        content_ref: String,
    ) -> Result<RecordEntry, ContractError> {
        Self::require_writer(&env, &patient, &doctor)?;
        validation::validate_content_ref(&content_ref)?;
        Ok(Self::append(
            &env,
            &patient,
            &doctor,
            RecordKind::Prescription,
            RecordBody::Content(content_ref),
        ))
    }

    pub fn add_doctor_file(
        env: Env,
        patient: Address,
        doctor: Address,
        content_ref: String,
    ) -> Result<RecordEntry, ContractError> {
        Self::require_writer(&env, &patient, &doctor)?;
        validation::validate_content_ref(&content_ref)?;
        Ok(Self::append(
            &env,
            &patient,
            &doctor,
            RecordKind::DoctorFile,
            RecordBody::Content(content_ref),
        ))
    }

    pub fn list_treatments(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<RecordView>, ContractError> {
        Self::list_kind(&env, &caller, &patient, RecordKind::Treatment)
    }

    pub fn list_prescriptions(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<RecordView>, ContractError> {
        Self::list_kind(&env, &caller, &patient, RecordKind::Prescription)
    }

    pub fn list_doctor_files(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<Vec<RecordView>, ContractError> {
        Self::list_kind(&env, &caller, &patient, RecordKind::DoctorFile)
    }

    pub fn get_record_count(env: Env) -> u64 {
        records::total_entries(&env)
    }

    // ======================== Read Model ========================

    /// `(patients, doctors)` registered so far.
    pub fn get_counts(env: Env) -> (u32, u32) {
        queries::counts(&env)
    }

    pub fn pending_appointment_count(env: Env, doctor: Address) -> u32 {
        queries::pending_appointment_count(&env, &doctor)
    }

    pub fn approved_patient_count(env: Env, doctor: Address) -> u32 {
        queries::approved_patient_count(&env, &doctor)
    }

    pub fn patient_bundle(
        env: Env,
        caller: Address,
        patient: Address,
    ) -> Result<PatientBundle, ContractError> {
        caller.require_auth();
        queries::patient_bundle(&env, &caller, &patient)
    }
}

impl MedicalLedgerContract {
    fn decide(
        env: &Env,
        appointment_id: u64,
        acting_doctor: &Address,
        next: AppointmentStatus,
    ) -> Result<Appointment, ContractError> {
        circuit_breaker::require_not_paused(env, &circuit_breaker::APPOINTMENTS)?;
        acting_doctor.require_auth();

        let mut appt =
            appointment::get_appointment(env, appointment_id).ok_or(ContractError::NotFound)?;
        if appt.doctor != *acting_doctor {
            return Err(ContractError::Unauthorized);
        }
        appt.status = appt.status.transition(next)?;
        appt.decided_at = Some(env.ledger().timestamp());
        appointment::set_appointment(env, &appt);

        events::publish_appointment(
            env,
            appt.id,
            appt.patient.clone(),
            appt.doctor.clone(),
            appt.status,
        );

        Ok(appt)
    }

    /// Write precondition shared by every record entry point: the doctor
    /// authorizes and holds granted access at call time.
    fn require_writer(env: &Env, patient: &Address, doctor: &Address) -> Result<(), ContractError> {
        circuit_breaker::require_not_paused(env, &circuit_breaker::RECORDS)?;
        doctor.require_auth();

        if !access::has_access(env, patient, doctor) {
            return Err(ContractError::AccessDenied);
        }
        Ok(())
    }

    fn append(
        env: &Env,
        patient: &Address,
        doctor: &Address,
        kind: RecordKind,
        body: RecordBody,
    ) -> RecordEntry {
        let entry = records::append(env, patient, doctor, kind, body);
        events::publish_record_added(env, entry.id, patient.clone(), doctor.clone(), kind);
        entry
    }

    fn list_kind(
        env: &Env,
        caller: &Address,
        patient: &Address,
        kind: RecordKind,
    ) -> Result<Vec<RecordView>, ContractError> {
        caller.require_auth();
        let scope = queries::read_scope(env, caller, patient)?;
        Ok(records::views(env, patient, kind, &scope))
    }
}


#[cfg(test)]
mod test_access;

#[cfg(test)]
mod test_pause;
