//! Shared validation rules for the medical ledger suite.
//!
//! This crate provides:
//! - [`content_ref`] — syntax rules for content addresses (CIDs) that both the
//!   on-chain contract and the off-chain content store client enforce.
//! - [`schedule`] — appointment slot checks.
//! - [`text`] — blank-field detection on raw UTF-8 bytes.
//!
//! Everything here operates on plain byte slices so the same rules run inside
//! a `no_std` contract and in host-side tooling.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

// ── Modules ──────────────────────────────────────────────────────────────────

pub mod content_ref;
pub mod schedule;
pub mod text;

pub use content_ref::*;
pub use schedule::*;
pub use text::*;
