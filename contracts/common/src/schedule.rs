//! Appointment slot rules.
//!
//! Times are carried as `HHMM` integers (`14:30` → `1430`), dates as UNIX
//! seconds for the requested day.

/// Returns `true` if `time` is a valid 24-hour `HHMM` value.
pub fn is_valid_hhmm(time: u32) -> bool {
    let hours = time / 100;
    let minutes = time % 100;
    hours < 24 && minutes < 60
}
