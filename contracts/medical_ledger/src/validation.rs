use crate::ContractError;
use common::MAX_CONTENT_REF_LEN;
use soroban_sdk::String;

/// Longest accepted profile field (name, license number, ...).
pub const MAX_FIELD_LEN: u32 = 128;

/// Longest accepted treatment note.
pub const MAX_NOTE_LEN: u32 = 2048;

fn is_blank(value: &String, buf: &mut [u8]) -> bool {
    let len = value.len() as usize;
    let slice = &mut buf[..len];
    value.copy_into_slice(slice);
    common::is_blank(slice)
}

/// Required, non-blank profile field.
pub fn validate_required(value: &String) -> Result<(), ContractError> {
    if value.len() > MAX_FIELD_LEN {
        return Err(ContractError::InvalidFields);
    }
    let mut buf = [0u8; MAX_FIELD_LEN as usize];
    if is_blank(value, &mut buf) {
        return Err(ContractError::InvalidFields);
    }
    Ok(())
}

/// Optional descriptive field: may be empty, but still bounded.
pub fn validate_optional(value: &String) -> Result<(), ContractError> {
    if value.len() > MAX_FIELD_LEN {
        return Err(ContractError::InvalidFields);
    }
    Ok(())
}

pub fn validate_note(text: &String) -> Result<(), ContractError> {
    if text.len() > MAX_NOTE_LEN {
        return Err(ContractError::InvalidFields);
    }
    let mut buf = [0u8; MAX_NOTE_LEN as usize];
    if is_blank(text, &mut buf) {
        return Err(ContractError::EmptyNote);
    }
    Ok(())
}

/// Syntactic content-address check. The referenced blob is not required to
/// exist yet; it is resolved lazily by readers.
pub fn validate_content_ref(reference: &String) -> Result<(), ContractError> {
    let len = reference.len() as usize;
    if len == 0 || len > MAX_CONTENT_REF_LEN {
        return Err(ContractError::InvalidReference);
    }
    let mut buf = [0u8; MAX_CONTENT_REF_LEN];
    let slice = &mut buf[..len];
    reference.copy_into_slice(slice);
    if !common::is_valid_content_ref(slice) {
        return Err(ContractError::InvalidReference);
    }
    Ok(())
}

pub fn validate_schedule(time: u32) -> Result<(), ContractError> {
    if !common::is_valid_hhmm(time) {
        return Err(ContractError::InvalidSchedule);
    }
    Ok(())
}
