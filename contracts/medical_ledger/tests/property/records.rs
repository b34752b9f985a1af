//! Record ledger payload properties.
//!
//! Invariants tested:
//! - A note is rejected with `EmptyNote` exactly when it is blank
//! - A content reference is accepted exactly when the shared syntax check accepts it
//! - Sequence numbers of a segment run 1, 2, 3, ... in append order

use crate::support::{doctor, patient, setup};
use medical_ledger::ContractError;
use proptest::prelude::*;
use soroban_sdk::String;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_blank_notes_rejected(text in "[ \t\n\u{00a0}\u{2003}\u{3000}a-z]{0,24}") {
        let (env, client) = setup();
        let p = patient(&env, &client);
        let d = doctor(&env, &client);
        client.request_access(&d, &p);
        client.grant_access(&p, &d, &p);

        let result = client.try_add_treatment_note(&p, &d, &String::from_str(&env, &text));
        if text.trim().is_empty() {
            prop_assert_eq!(result, Err(Ok(ContractError::EmptyNote)));
        } else {
            prop_assert!(result.is_ok());
        }
    }

    #[test]
    fn prop_reference_syntax_agrees_with_common(
        reference in prop_oneof![
            "Qm[1-9A-HJ-NP-Za-km-z]{44}",
            "b[a-z2-7]{58,70}",
            "[A-Za-z0-9_]{0,60}",
        ]
    ) {
        let (env, client) = setup();
        let p = patient(&env, &client);
        let d = doctor(&env, &client);
        client.request_access(&d, &p);
        client.grant_access(&p, &d, &p);

        let result = client.try_add_prescription(&p, &d, &String::from_str(&env, &reference));
        if common::is_valid_content_ref(reference.as_bytes()) {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(Ok(ContractError::InvalidReference)));
        }
    }

    #[test]
    fn prop_sequence_is_dense(count in 1u32..8) {
        let (env, client) = setup();
        let p = patient(&env, &client);
        let d = doctor(&env, &client);
        client.request_access(&d, &p);
        client.grant_access(&p, &d, &p);

        for expected in 1..=count {
            let entry = client.add_treatment_note(&p, &d, &String::from_str(&env, "entry"));
            prop_assert_eq!(entry.sequence, expected);
        }
        let views = client.list_treatments(&p, &p);
        for (i, view) in views.iter().enumerate() {
            prop_assert_eq!(view.entry.sequence, i as u32 + 1);
        }
    }
}
