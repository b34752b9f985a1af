//! Consent ledger properties, checked against a small reference model.
//!
//! Invariants tested:
//! - Writes succeed iff the doctor holds Granted access at call time
//! - Granted only ever leaves via an explicit revoke
//! - Revoke never removes entries that were already written

use crate::support::{doctor, patient, setup};
use medical_ledger::{AccessState, ContractError};
use proptest::prelude::*;
use proptest_derive::Arbitrary;
use soroban_sdk::String;

#[derive(Clone, Copy, Debug, Arbitrary)]
enum Op {
    Request,
    Grant,
    Revoke,
    Write,
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_consent_matches_model(ops in prop::collection::vec(any::<Op>(), 1..16)) {
        let (env, client) = setup();
        let p = patient(&env, &client);
        let d = doctor(&env, &client);
        let note = String::from_str(&env, "observation");

        let mut model: Option<AccessState> = None;
        let mut written = 0u32;

        for step in ops {
            let before = model;
            match step {
                Op::Request => {
                    prop_assert!(client.try_request_access(&d, &p).is_ok());
                    model = match before {
                        None | Some(AccessState::Revoked) => Some(AccessState::Requested),
                        other => other,
                    };
                }
                Op::Grant => {
                    let result = client.try_grant_access(&p, &d, &p);
                    match before {
                        Some(AccessState::Requested) | Some(AccessState::Granted) => {
                            prop_assert!(result.is_ok());
                            model = Some(AccessState::Granted);
                        }
                        _ => prop_assert_eq!(result, Err(Ok(ContractError::NoPendingRequest))),
                    }
                }
                Op::Revoke => {
                    let result = client.try_revoke_access(&p, &d, &p);
                    match before {
                        Some(AccessState::Requested) | Some(AccessState::Granted) => {
                            prop_assert!(result.is_ok());
                            model = Some(AccessState::Revoked);
                        }
                        _ => prop_assert_eq!(result, Err(Ok(ContractError::InvalidTransition))),
                    }
                }
                Op::Write => {
                    let result = client.try_add_treatment_note(&p, &d, &note);
                    if before == Some(AccessState::Granted) {
                        prop_assert!(result.is_ok());
                        written += 1;
                    } else {
                        prop_assert_eq!(result, Err(Ok(ContractError::AccessDenied)));
                    }
                }
            }

            if before == Some(AccessState::Granted) && !matches!(step, Op::Revoke) {
                prop_assert_eq!(model, Some(AccessState::Granted));
            }
            prop_assert_eq!(client.get_access_state(&p, &d), model);
            prop_assert_eq!(client.has_access(&p, &d), model == Some(AccessState::Granted));
            prop_assert_eq!(client.list_treatments(&p, &p).len(), written);
        }
    }

    /// Grants are per pair: consent for one doctor says nothing about another.
    #[test]
    fn prop_grants_are_isolated(granted_first in any::<bool>()) {
        let (env, client) = setup();
        let p = patient(&env, &client);
        let d1 = doctor(&env, &client);
        let d2 = doctor(&env, &client);
        client.request_access(&d1, &p);
        client.request_access(&d2, &p);

        let (winner, loser) = if granted_first { (&d1, &d2) } else { (&d2, &d1) };
        client.grant_access(&p, winner, &p);

        prop_assert!(client.has_access(&p, winner));
        prop_assert!(!client.has_access(&p, loser));
        let pending = client.list_pending_for_patient(&p);
        prop_assert_eq!(pending.len(), 1);
        prop_assert_eq!(&pending.get(0).unwrap(), loser);
    }
}
