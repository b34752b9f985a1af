use soroban_sdk::contracttype;

/// Error categories for classifying different types of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorCategory {
    /// Validation errors: malformed fields, references or schedule values
    Validation = 1,
    /// Authorization errors: the acting principal may not perform the operation
    Authorization = 2,
    /// Not found errors: unknown profile or appointment
    NotFound = 3,
    /// State conflict errors: duplicate registration, finalized appointments,
    /// grant transitions that do not apply
    StateConflict = 4,
    /// System errors: initialization and circuit breaker
    System = 5,
}

/// Error severity levels indicating the impact and urgency of errors
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ErrorSeverity {
    /// Low severity: the caller sent something malformed
    Low = 1,
    /// Medium severity: an authorization or state rule was hit
    Medium = 2,
    /// High severity: the contract cannot serve the request at all
    High = 3,
}

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    UnknownParty = 4,
    AlreadyRegistered = 5,
    InvalidFields = 6,
    InvalidTransition = 7,
    AlreadyFinalized = 8,
    AccessDenied = 9,
    NoPendingRequest = 10,
    EmptyNote = 11,
    InvalidReference = 12,
    NotFound = 13,
    Paused = 14,
    InvalidSchedule = 15,
}

impl ContractError {
    /// Returns the error category for this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ContractError::InvalidFields
            | ContractError::EmptyNote
            | ContractError::InvalidReference
            | ContractError::InvalidSchedule => ErrorCategory::Validation,
            ContractError::Unauthorized | ContractError::AccessDenied => {
                ErrorCategory::Authorization
            }
            ContractError::UnknownParty | ContractError::NotFound => ErrorCategory::NotFound,
            ContractError::AlreadyRegistered
            | ContractError::InvalidTransition
            | ContractError::AlreadyFinalized
            | ContractError::NoPendingRequest => ErrorCategory::StateConflict,
            ContractError::NotInitialized
            | ContractError::AlreadyInitialized
            | ContractError::Paused => ErrorCategory::System,
        }
    }

    /// Returns the severity level for this error.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ContractError::InvalidFields
            | ContractError::EmptyNote
            | ContractError::InvalidReference
            | ContractError::InvalidSchedule
            | ContractError::UnknownParty
            | ContractError::NotFound
            | ContractError::AlreadyRegistered
            | ContractError::AlreadyInitialized => ErrorSeverity::Low,
            ContractError::Unauthorized
            | ContractError::AccessDenied
            | ContractError::InvalidTransition
            | ContractError::AlreadyFinalized
            | ContractError::NoPendingRequest => ErrorSeverity::Medium,
            ContractError::NotInitialized | ContractError::Paused => ErrorSeverity::High,
        }
    }

    /// Every outcome is terminal for the caller except a paused contract,
    /// which may accept the same call once resumed.
    pub fn retryable(&self) -> bool {
        matches!(self, ContractError::Paused)
    }

    /// Returns a human-readable error message for this error.
    pub fn message(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract has not been initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Caller is not authorized for this operation",
            ContractError::UnknownParty => "Principal is not registered with the required role",
            ContractError::AlreadyRegistered => "Principal already holds a role",
            ContractError::InvalidFields => "Required profile fields are missing or malformed",
            ContractError::InvalidTransition => "State transition is not permitted",
            ContractError::AlreadyFinalized => "Appointment has already been decided",
            ContractError::AccessDenied => "Doctor does not hold granted access to this record",
            ContractError::NoPendingRequest => "No pending access request from this doctor",
            ContractError::EmptyNote => "Treatment note is empty",
            ContractError::InvalidReference => "Content reference is not a valid content address",
            ContractError::NotFound => "Requested entity does not exist",
            ContractError::Paused => "Contract operations are currently paused",
            ContractError::InvalidSchedule => "Appointment time is not a valid HHMM value",
        }
    }
}
