//! Property-based tests for journal acceptance rules.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use saldo_shared::AccountCode;

use super::account::{AccountKind, NewAccount};
use super::entry::{EntryDraft, JournalKind, JournalLine};
use super::error::LedgerError;
use super::journal::JournalService;
use super::registry::AccountRegistry;
use crate::storage::MemoryStore;

fn code(text: &str) -> AccountCode {
    AccountCode::parse(text).unwrap()
}

fn seeded_store() -> MemoryStore {
    let store = MemoryStore::new();
    for (account_code, name, kind) in [
        ("1-110", "Bank", AccountKind::Asset),
        ("3-101", "Owner capital", AccountKind::Equity),
        ("4-100", "Service revenue", AccountKind::Revenue),
    ] {
        AccountRegistry::add(
            &store,
            NewAccount {
                code: account_code.to_string(),
                name: name.to_string(),
                kind,
                is_contra: false,
            },
        )
        .unwrap();
    }
    store
}

/// Strategy for positive amounts between 0.01 and 1,000,000.00.
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1u32..=28).prop_map(|day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// *For any* accepted entry, the debit and credit sums are exactly equal.
    #[test]
    fn prop_accepted_entries_balance(
        date in any_date(),
        amounts in prop::collection::vec(positive_amount(), 1..6),
    ) {
        let store = seeded_store();
        let total: Decimal = amounts.iter().copied().sum();
        let mut lines: Vec<JournalLine> = amounts
            .iter()
            .map(|amount| JournalLine::debit(code("1-110"), *amount))
            .collect();
        lines.push(JournalLine::credit(code("4-100"), total));

        let entry = JournalService::add(
            &store,
            JournalKind::Transactions,
            EntryDraft {
                date,
                description: "Generated entry".to_string(),
                lines,
            },
        )
        .unwrap();

        prop_assert_eq!(entry.total_debits(), entry.total_credits());
    }

    /// *For any* unbalanced draft, the journal rejects it and stays unchanged.
    #[test]
    fn prop_unbalanced_drafts_rejected(
        date in any_date(),
        amount in positive_amount(),
        skew in positive_amount(),
    ) {
        let store = seeded_store();
        let draft = EntryDraft {
            date,
            description: "Skewed entry".to_string(),
            lines: vec![
                JournalLine::debit(code("1-110"), amount + skew),
                JournalLine::credit(code("4-100"), amount),
            ],
        };

        let result = JournalService::add(&store, JournalKind::Transactions, draft);
        let is_unbalanced = matches!(result, Err(LedgerError::Unbalanced { .. }));
        prop_assert!(is_unbalanced);
        prop_assert!(JournalService::list(&store, JournalKind::Transactions).unwrap().is_empty());
    }

    /// *For any* sequence of adds and deletes, issued ids strictly increase.
    #[test]
    fn prop_ids_monotonic_across_deletions(
        dates in prop::collection::vec(any_date(), 2..8),
        delete_first in any::<bool>(),
    ) {
        let store = seeded_store();
        let mut last_id = None;

        for (index, date) in dates.iter().enumerate() {
            let entry = JournalService::add(
                &store,
                JournalKind::Transactions,
                EntryDraft {
                    date: *date,
                    description: format!("Entry {index}"),
                    lines: vec![
                        JournalLine::debit(code("1-110"), Decimal::ONE),
                        JournalLine::credit(code("4-100"), Decimal::ONE),
                    ],
                },
            )
            .unwrap();

            if let Some(previous) = last_id {
                prop_assert!(entry.id > previous, "id {} not above {}", entry.id, previous);
            }
            last_id = Some(entry.id);

            if delete_first && index == 0 {
                JournalService::remove(&store, JournalKind::Transactions, entry.id).unwrap();
            }
        }
    }

    /// *For any* listing, entries come out ordered by `(date, id)`.
    #[test]
    fn prop_listing_is_sorted(
        dates in prop::collection::vec(any_date(), 1..10),
    ) {
        let store = seeded_store();
        for date in &dates {
            JournalService::add(
                &store,
                JournalKind::Transactions,
                EntryDraft {
                    date: *date,
                    description: "Entry".to_string(),
                    lines: vec![
                        JournalLine::debit(code("1-110"), Decimal::ONE),
                        JournalLine::credit(code("4-100"), Decimal::ONE),
                    ],
                },
            )
            .unwrap();
        }

        let listed = JournalService::list(&store, JournalKind::Transactions).unwrap();
        for pair in listed.windows(2) {
            prop_assert!((pair[0].date, pair[0].id) <= (pair[1].date, pair[1].id));
        }
    }
}
