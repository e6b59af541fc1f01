//! Contra-account to parent linking.
//!
//! Which account a contra account reduces is not recorded in the data model;
//! it is inferred at presentation time. The inference is deliberately
//! isolated behind the [`ContraLinker`] trait so its assumptions live and are
//! tested in one place, and so an embedding can swap in a stricter strategy.

use crate::ledger::account::Account;

/// Strategy for finding the parent a contra account nets against.
pub trait ContraLinker {
    /// Picks the parent for `contra` among `candidates` (the accounts of the
    /// same statement section), or `None` to report the contra standalone.
    fn find_parent<'a>(&self, contra: &Account, candidates: &'a [Account]) -> Option<&'a Account>;
}

/// Default heuristic: code proximity plus name containment.
///
/// A candidate qualifies when it is a non-contra account of the same kind,
/// shares the contra's major code segment, and sits within `window` of the
/// contra's minor segment. Among qualifiers, candidates whose name occurs
/// inside the contra's name win (an "accumulated depreciation - vehicle"
/// account links to "vehicle"), then the nearest minor segment, then code
/// order.
#[derive(Debug, Clone)]
pub struct CodeProximityLinker {
    /// Maximum distance between minor code segments.
    pub window: u32,
}

impl Default for CodeProximityLinker {
    fn default() -> Self {
        Self { window: 50 }
    }
}

impl ContraLinker for CodeProximityLinker {
    fn find_parent<'a>(&self, contra: &Account, candidates: &'a [Account]) -> Option<&'a Account> {
        let contra_name = contra.name.to_lowercase();

        candidates
            .iter()
            .filter(|candidate| {
                !candidate.is_contra
                    && candidate.kind == contra.kind
                    && candidate.code != contra.code
                    && candidate.code.major() == contra.code.major()
                    && candidate.code.minor_distance(&contra.code) <= self.window
            })
            .min_by_key(|candidate| {
                let name_match = contra_name.contains(&candidate.name.to_lowercase());
                (
                    !name_match,
                    candidate.code.minor_distance(&contra.code),
                    candidate.code.clone(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::account::AccountKind;
    use saldo_shared::AccountCode;

    fn account(code: &str, name: &str, is_contra: bool) -> Account {
        Account {
            code: AccountCode::parse(code).unwrap(),
            name: name.to_string(),
            kind: AccountKind::Asset,
            is_contra,
        }
    }

    #[test]
    fn test_links_accumulated_depreciation_to_vehicle() {
        let contra = account("1-240", "Accumulated depreciation - vehicle", true);
        let candidates = vec![
            account("1-100", "Petty cash", false),
            account("1-230", "Vehicle", false),
            contra.clone(),
        ];

        let linker = CodeProximityLinker::default();
        let parent = linker.find_parent(&contra, &candidates).unwrap();
        assert_eq!(parent.code.as_str(), "1-230");
    }

    #[test]
    fn test_name_containment_beats_equal_distance() {
        let contra = account("1-240", "Accumulated depreciation - vehicle", true);
        let candidates = vec![
            account("1-230", "Vehicle", false),
            account("1-250", "Office equipment", false),
            contra.clone(),
        ];

        let linker = CodeProximityLinker::default();
        let parent = linker.find_parent(&contra, &candidates).unwrap();
        assert_eq!(parent.name, "Vehicle");
    }

    #[test]
    fn test_no_candidate_within_window() {
        let contra = account("1-900", "Accumulated depreciation", true);
        let candidates = vec![account("1-100", "Petty cash", false), contra.clone()];

        let linker = CodeProximityLinker::default();
        assert!(linker.find_parent(&contra, &candidates).is_none());
    }

    #[test]
    fn test_different_major_segment_never_links() {
        let contra = account("1-240", "Accumulated depreciation", true);
        let candidates = vec![
            Account {
                code: AccountCode::parse("2-230").unwrap(),
                name: "Bank loan".to_string(),
                kind: AccountKind::Asset,
                is_contra: false,
            },
            contra.clone(),
        ];

        let linker = CodeProximityLinker::default();
        assert!(linker.find_parent(&contra, &candidates).is_none());
    }

    #[test]
    fn test_other_contra_accounts_never_qualify() {
        let contra = account("1-240", "Accumulated depreciation - vehicle", true);
        let candidates = vec![
            account("1-250", "Accumulated depreciation - equipment", true),
            contra.clone(),
        ];

        let linker = CodeProximityLinker::default();
        assert!(linker.find_parent(&contra, &candidates).is_none());
    }
}
