use crate::{events, ContractError, ADMIN};
use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

// ── Types ─────────────────────────────────────────────────────

/// Defines the scope of the pause mechanism
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PauseScope {
    /// Halts every mutating entry point
    Global,
    /// Halts a single entry point, named by its pause symbol
    Function(Symbol),
}

// Pause symbols, one per mutating entry point.
pub const REG_PATIENT: Symbol = symbol_short!("REG_PAT");
pub const REG_DOCTOR: Symbol = symbol_short!("REG_DOC");
pub const UPDATE_META: Symbol = symbol_short!("META_UPD");
pub const APPOINTMENTS: Symbol = symbol_short!("APPT");
pub const ACCESS: Symbol = symbol_short!("ACCESS");
pub const RECORDS: Symbol = symbol_short!("RECORDS");

// ── Storage Keys ─────────────────────────────────────────────

pub fn global_pause_key() -> Symbol {
    symbol_short!("P_GLOB")
}

pub fn function_pause_key(func: &Symbol) -> (Symbol, Symbol) {
    (symbol_short!("P_FUNC"), func.clone())
}

// ── Core Logistics ───────────────────────────────────────────

/// Fails with `Paused` if either the global switch or `func`'s switch is on.
pub fn require_not_paused(env: &Env, func: &Symbol) -> Result<(), ContractError> {
    if is_paused(env, &PauseScope::Global) || is_paused(env, &PauseScope::Function(func.clone())) {
        return Err(ContractError::Paused);
    }
    Ok(())
}

pub fn is_paused(env: &Env, scope: &PauseScope) -> bool {
    match scope {
        PauseScope::Global => env
            .storage()
            .instance()
            .get(&global_pause_key())
            .unwrap_or(false),
        PauseScope::Function(func) => env
            .storage()
            .instance()
            .get(&function_pause_key(func))
            .unwrap_or(false),
    }
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), ContractError> {
    let admin: Address = env
        .storage()
        .instance()
        .get(&ADMIN)
        .ok_or(ContractError::NotInitialized)?;
    if *caller != admin {
        return Err(ContractError::Unauthorized);
    }
    Ok(())
}

fn set_flag(env: &Env, scope: &PauseScope, value: bool) {
    match scope {
        PauseScope::Global => {
            env.storage().instance().set(&global_pause_key(), &value);
        }
        PauseScope::Function(func) => {
            env.storage()
                .instance()
                .set(&function_pause_key(func), &value);
        }
    }
}

/// Engages a circuit breaker for the specified scope. Admin only.
pub fn pause_contract(env: &Env, caller: &Address, scope: PauseScope) -> Result<(), ContractError> {
    require_admin(env, caller)?;
    set_flag(env, &scope, true);
    events::publish_contract_paused(env, caller.clone(), scope);
    Ok(())
}

/// Releases a circuit breaker for the specified scope. Admin only.
pub fn resume_contract(
    env: &Env,
    caller: &Address,
    scope: PauseScope,
) -> Result<(), ContractError> {
    require_admin(env, caller)?;
    set_flag(env, &scope, false);
    events::publish_contract_resumed(env, caller.clone(), scope);
    Ok(())
}
