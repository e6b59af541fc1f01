//! Chart of accounts domain types.

use rust_decimal::Decimal;
use saldo_shared::AccountCode;
use serde::{Deserialize, Serialize};

/// Account classification.
///
/// The five classes of the accounting equation. Classification determines the
/// normal balance side and which statements an account appears on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountKind {
    /// Resources owned (cash, receivables, equipment).
    Asset,
    /// Obligations owed (payables, loans, unearned revenue).
    Liability,
    /// Owner claims (capital contributions, retained earnings).
    Equity,
    /// Income earned.
    Revenue,
    /// Costs incurred.
    Expense,
}

/// Which side an account kind accumulates net value on.
///
/// - Asset/Expense: balance = debit - credit (debit-normal)
/// - Liability/Equity/Revenue: balance = credit - debit (credit-normal)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalSide {
    /// Debit-normal accounts (Asset, Expense)
    Debit,
    /// Credit-normal accounts (Liability, Equity, Revenue)
    Credit,
}

impl NormalSide {
    /// Derives the signed balance from accumulated debit and credit totals.
    #[must_use]
    pub fn balance(self, debit: Decimal, credit: Decimal) -> Decimal {
        match self {
            Self::Debit => debit - credit,
            Self::Credit => credit - debit,
        }
    }
}

impl AccountKind {
    /// All five kinds, in statement order.
    pub const ALL: [Self; 5] = [
        Self::Asset,
        Self::Liability,
        Self::Equity,
        Self::Revenue,
        Self::Expense,
    ];

    /// Returns the normal balance side for this kind.
    ///
    /// This is the fundamental sign convention and is determined solely by
    /// the kind; contra accounts use the same formula as their kind.
    #[must_use]
    pub const fn normal_side(self) -> NormalSide {
        match self {
            Self::Asset | Self::Expense => NormalSide::Debit,
            Self::Liability | Self::Equity | Self::Revenue => NormalSide::Credit,
        }
    }

    /// Lowercase name, matching the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asset => "asset",
            Self::Liability => "liability",
            Self::Equity => "equity",
            Self::Revenue => "revenue",
            Self::Expense => "expense",
        }
    }
}

impl std::fmt::Display for AccountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An account in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Unique, stable account code.
    pub code: AccountCode,
    /// Human-readable account name.
    pub name: String,
    /// Account classification.
    #[serde(rename = "type")]
    pub kind: AccountKind,
    /// Whether this account reduces its class total (e.g. accumulated depreciation).
    #[serde(default)]
    pub is_contra: bool,
}

/// Input for registering a new account.
///
/// The code arrives as raw text and is parsed at the registry boundary.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Account code text, `N-NNN`.
    pub code: String,
    /// Account name.
    pub name: String,
    /// Account classification.
    pub kind: AccountKind,
    /// Contra flag.
    pub is_contra: bool,
}

/// Input for updating an existing account.
///
/// The code is fixed; name, kind, and contra flag are replaced wholesale.
#[derive(Debug, Clone)]
pub struct AccountUpdate {
    /// New account name.
    pub name: String,
    /// New account classification.
    pub kind: AccountKind,
    /// New contra flag.
    pub is_contra: bool,
}

/// The chart of accounts partitioned by kind.
///
/// All five sections are always present, each sorted by code. Membership
/// derives from the account's current kind, so retyping an account moves it
/// between sections on the next partition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartOfAccounts {
    /// Asset accounts.
    pub assets: Vec<Account>,
    /// Liability accounts.
    pub liabilities: Vec<Account>,
    /// Equity accounts.
    pub equity: Vec<Account>,
    /// Revenue accounts.
    pub revenue: Vec<Account>,
    /// Expense accounts.
    pub expenses: Vec<Account>,
}

impl ChartOfAccounts {
    /// Partitions a flat account list into the five sections, each in code order.
    #[must_use]
    pub fn from_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let mut chart = Self::default();
        for account in accounts {
            chart.section_mut(account.kind).push(account);
        }
        for kind in AccountKind::ALL {
            chart.section_mut(kind).sort_by(|a, b| a.code.cmp(&b.code));
        }
        chart
    }

    /// Returns the section for a kind.
    #[must_use]
    pub fn section(&self, kind: AccountKind) -> &[Account] {
        match kind {
            AccountKind::Asset => &self.assets,
            AccountKind::Liability => &self.liabilities,
            AccountKind::Equity => &self.equity,
            AccountKind::Revenue => &self.revenue,
            AccountKind::Expense => &self.expenses,
        }
    }

    fn section_mut(&mut self, kind: AccountKind) -> &mut Vec<Account> {
        match kind {
            AccountKind::Asset => &mut self.assets,
            AccountKind::Liability => &mut self.liabilities,
            AccountKind::Equity => &mut self.equity,
            AccountKind::Revenue => &mut self.revenue,
            AccountKind::Expense => &mut self.expenses,
        }
    }

    /// Iterates every account across all sections.
    pub fn iter(&self) -> impl Iterator<Item = &Account> {
        AccountKind::ALL
            .into_iter()
            .flat_map(move |kind| self.section(kind).iter())
    }

    /// Looks up an account by code in any section.
    #[must_use]
    pub fn get(&self, code: &AccountCode) -> Option<&Account> {
        self.iter().find(|account| &account.code == code)
    }

    /// Total number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        AccountKind::ALL.into_iter().map(|kind| self.section(kind).len()).sum()
    }

    /// Returns true if no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(code: &str, name: &str, kind: AccountKind) -> Account {
        Account {
            code: AccountCode::parse(code).unwrap(),
            name: name.to_string(),
            kind,
            is_contra: false,
        }
    }

    #[test]
    fn test_normal_side_by_kind() {
        assert_eq!(AccountKind::Asset.normal_side(), NormalSide::Debit);
        assert_eq!(AccountKind::Expense.normal_side(), NormalSide::Debit);
        assert_eq!(AccountKind::Liability.normal_side(), NormalSide::Credit);
        assert_eq!(AccountKind::Equity.normal_side(), NormalSide::Credit);
        assert_eq!(AccountKind::Revenue.normal_side(), NormalSide::Credit);
    }

    #[test]
    fn test_partition_keeps_all_sections() {
        let chart = ChartOfAccounts::from_accounts([account("1-110", "Bank", AccountKind::Asset)]);
        assert_eq!(chart.assets.len(), 1);
        assert!(chart.liabilities.is_empty());
        assert!(chart.equity.is_empty());
        assert!(chart.revenue.is_empty());
        assert!(chart.expenses.is_empty());
    }

    #[test]
    fn test_sections_sorted_by_code() {
        let chart = ChartOfAccounts::from_accounts([
            account("1-230", "Vehicle", AccountKind::Asset),
            account("1-100", "Petty cash", AccountKind::Asset),
            account("1-110", "Bank", AccountKind::Asset),
        ]);
        let codes: Vec<&str> = chart.assets.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(codes, ["1-100", "1-110", "1-230"]);
    }

    #[test]
    fn test_get_searches_every_section() {
        let chart = ChartOfAccounts::from_accounts([
            account("1-110", "Bank", AccountKind::Asset),
            account("4-100", "Service revenue", AccountKind::Revenue),
        ]);
        let code = AccountCode::parse("4-100").unwrap();
        assert_eq!(chart.get(&code).unwrap().name, "Service revenue");
        assert!(chart.get(&AccountCode::parse("9-999").unwrap()).is_none());
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AccountKind::Asset).unwrap(), "\"asset\"");
        assert_eq!(
            serde_json::from_str::<AccountKind>("\"liability\"").unwrap(),
            AccountKind::Liability
        );
        assert!(serde_json::from_str::<AccountKind>("\"contra\"").is_err());
    }

    #[test]
    fn test_account_type_field_name() {
        let account = account("1-110", "Bank", AccountKind::Asset);
        let json = serde_json::to_value(&account).unwrap();
        assert_eq!(json["type"], "asset");
        assert_eq!(json["is_contra"], false);
    }
}
