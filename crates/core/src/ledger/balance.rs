//! Account balance calculation.
//!
//! Balances are a pure projection over the chart of accounts and the two
//! journal collections. Nothing here is cached or persisted; every report
//! derivation starts from a fresh fold.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use saldo_shared::AccountCode;
use serde::{Deserialize, Serialize};

use super::account::{Account, AccountKind};
use super::entry::Entry;

/// Accumulated debit/credit totals and the derived balance for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account code.
    pub code: AccountCode,
    /// Account name.
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Contra flag, carried through for presentation.
    pub is_contra: bool,
    /// Sum of all debits posted.
    pub debit: Decimal,
    /// Sum of all credits posted.
    pub credit: Decimal,
    /// Signed net using the kind's normal side.
    pub balance: Decimal,
}

impl AccountBalance {
    fn zeroed(account: &Account) -> Self {
        Self {
            code: account.code.clone(),
            name: account.name.clone(),
            kind: account.kind,
            is_contra: account.is_contra,
            debit: Decimal::ZERO,
            credit: Decimal::ZERO,
            balance: Decimal::ZERO,
        }
    }

    /// Returns true if any amount was posted to the account.
    #[must_use]
    pub fn has_activity(&self) -> bool {
        self.debit > Decimal::ZERO || self.credit > Decimal::ZERO
    }
}

/// Debit/credit totals for lines whose code is not in the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrphanedTotals {
    /// Sum of orphaned debits.
    pub debit: Decimal,
    /// Sum of orphaned credits.
    pub credit: Decimal,
}

/// The full balance projection: one entry per registered account.
///
/// Keyed by a `BTreeMap` so iteration order (and therefore report output) is
/// deterministic. Lines referencing unregistered codes accumulate into
/// `orphaned` - a synthetic bucket that never flows into reports - rather
/// than being silently dropped. The journal service rejects such lines at
/// acceptance, so orphans only appear when a store was edited out-of-band.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSet {
    /// Balances per registered account, in code order.
    pub accounts: BTreeMap<AccountCode, AccountBalance>,
    /// Totals for lines that reference no registered account.
    pub orphaned: BTreeMap<AccountCode, OrphanedTotals>,
}

impl BalanceSet {
    /// Looks up the balance record for a code.
    #[must_use]
    pub fn get(&self, code: &AccountCode) -> Option<&AccountBalance> {
        self.accounts.get(code)
    }

    /// The signed balance for a code, zero if the account carries none.
    #[must_use]
    pub fn balance_or_zero(&self, code: &AccountCode) -> Decimal {
        self.accounts
            .get(code)
            .map_or(Decimal::ZERO, |balance| balance.balance)
    }

    /// Iterates balances in code order.
    pub fn iter(&self) -> impl Iterator<Item = &AccountBalance> {
        self.accounts.values()
    }
}

/// Folds both journal collections over the chart of accounts.
///
/// Initializes one zeroed record per registered account, accumulates every
/// line's debit and credit (the order between the two collections does not
/// affect the result), then derives each balance from the account kind's
/// normal side. Contra accounts use the same formula as their kind; a
/// contra-asset naturally ends up negative and is netted against its parent
/// in presentation, not here.
#[must_use]
pub fn calculate_balances(
    accounts: &[Account],
    transactions: &[Entry],
    adjustments: &[Entry],
) -> BalanceSet {
    let mut set = BalanceSet::default();

    for account in accounts {
        set.accounts
            .insert(account.code.clone(), AccountBalance::zeroed(account));
    }

    for entry in transactions.iter().chain(adjustments) {
        for line in &entry.lines {
            if let Some(balance) = set.accounts.get_mut(&line.account) {
                balance.debit += line.debit;
                balance.credit += line.credit;
            } else {
                let orphan = set.orphaned.entry(line.account.clone()).or_default();
                orphan.debit += line.debit;
                orphan.credit += line.credit;
            }
        }
    }

    for balance in set.accounts.values_mut() {
        balance.balance = balance.kind.normal_side().balance(balance.debit, balance.credit);
    }

    set
}
