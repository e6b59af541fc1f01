//! Report data types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use saldo_shared::{AccountCode, EntryId};
use serde::{Deserialize, Serialize};

use crate::ledger::metadata::ReportMetadata;

/// One account row in the trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    /// Account code.
    pub account: AccountCode,
    /// Account name.
    pub name: String,
    /// Raw debit total.
    pub debit: Decimal,
    /// Raw credit total.
    pub credit: Decimal,
}

/// Trial balance totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceTotals {
    /// Total debit.
    pub total_debit: Decimal,
    /// Total credit.
    pub total_credit: Decimal,
    /// Whether debits equal credits.
    pub is_balanced: bool,
}

/// Trial balance report: raw debit/credit totals per active account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceReport {
    /// Account rows in code order.
    pub rows: Vec<TrialBalanceRow>,
    /// Totals.
    pub totals: TrialBalanceTotals,
}

/// One account row in the adjusted trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedTrialBalanceRow {
    /// Account code.
    pub account: AccountCode,
    /// Account name.
    pub name: String,
    /// Debit total.
    pub debit: Decimal,
    /// Credit total.
    pub credit: Decimal,
    /// Signed balance after adjustments.
    pub balance: Decimal,
}

/// Adjusted trial balance report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjustedTrialBalanceReport {
    /// Account rows in code order.
    pub rows: Vec<AdjustedTrialBalanceRow>,
    /// Totals over the listed rows.
    pub totals: TrialBalanceTotals,
}

/// One revenue or expense line on the income statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementLine {
    /// Account code.
    pub account: AccountCode,
    /// Account name.
    pub name: String,
    /// Signed balance.
    pub amount: Decimal,
}

/// Income statement report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeStatementReport {
    /// Revenue lines.
    pub revenues: Vec<IncomeStatementLine>,
    /// Expense lines.
    pub expenses: Vec<IncomeStatementLine>,
    /// Sum of revenue balances.
    pub total_revenue: Decimal,
    /// Sum of expense balances.
    pub total_expenses: Decimal,
    /// `total_revenue - total_expenses`; negative for a net loss.
    pub net_income: Decimal,
}

/// A contra account netted against its parent on the financial position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContraReduction {
    /// Contra account code.
    pub account: AccountCode,
    /// Contra account name.
    pub name: String,
    /// The amount by which the parent is reduced (the contra balance, sign
    /// flipped from the calculator convention).
    pub reduction: Decimal,
}

/// One account line in a financial position section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLine {
    /// Account code.
    pub account: AccountCode,
    /// Account name.
    pub name: String,
    /// The account's own signed balance.
    pub amount: Decimal,
    /// Contra accounts linked to this line, if any.
    #[serde(default)]
    pub contra_accounts: Vec<ContraReduction>,
    /// `amount` less the linked reductions.
    pub net_amount: Decimal,
    /// True for an unlinked contra account reported standalone.
    pub is_contra: bool,
}

/// Statement of financial position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialPositionReport {
    /// Asset lines.
    pub assets: Vec<PositionLine>,
    /// Liability lines.
    pub liabilities: Vec<PositionLine>,
    /// Equity lines.
    pub equity: Vec<PositionLine>,
    /// Sum of asset net amounts.
    pub total_assets: Decimal,
    /// Sum of liability net amounts.
    pub total_liabilities: Decimal,
    /// Equity net amounts plus undistributed net income.
    pub total_equity: Decimal,
    /// Net income for the period, shown within equity.
    pub net_income: Decimal,
    /// Whether `total_assets == total_liabilities + total_equity`.
    pub is_balanced: bool,
}

/// One reconstructed opening contribution on the statement of changes in equity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityOpeningRow {
    /// Equity account code.
    pub account: AccountCode,
    /// Account name.
    pub name: String,
    /// Inferred opening contribution, floored at zero.
    pub opening_balance: Decimal,
}

/// Statement of changes in equity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangesInEquityReport {
    /// Opening contributions per equity account, in code order.
    pub openings: Vec<EquityOpeningRow>,
    /// Sum of opening contributions.
    pub total_opening_capital: Decimal,
    /// Net income for the period.
    pub net_income: Decimal,
    /// `total_opening_capital + net_income`.
    pub total_equity: Decimal,
}

/// One posting in a general ledger account view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntryRow {
    /// Entry date.
    pub date: NaiveDate,
    /// Id of the entry this posting came from.
    pub entry_id: EntryId,
    /// Entry description.
    pub description: String,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Balance after this posting, on the account's normal side.
    pub running_balance: Decimal,
    /// True when the posting came from the adjustments collection.
    pub is_adjustment: bool,
}

/// General ledger detail for one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerAccountView {
    /// Account code.
    pub account: AccountCode,
    /// Account name.
    pub name: String,
    /// Postings in `(date, id)` order, transactions before adjustments.
    pub rows: Vec<LedgerEntryRow>,
    /// Total debits.
    pub total_debit: Decimal,
    /// Total credits.
    pub total_credit: Decimal,
    /// Final running balance.
    pub closing_balance: Decimal,
}

/// General ledger report: every account with at least one posting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralLedgerReport {
    /// Account views in code order.
    pub accounts: Vec<LedgerAccountView>,
}

/// Every derived statement, generated from one fresh snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportBundle {
    /// Report header labels.
    pub metadata: ReportMetadata,
    /// Trial balance.
    pub trial_balance: TrialBalanceReport,
    /// Adjusted trial balance.
    pub adjusted_trial_balance: AdjustedTrialBalanceReport,
    /// Income statement.
    pub income_statement: IncomeStatementReport,
    /// Statement of financial position.
    pub financial_position: FinancialPositionReport,
    /// Statement of changes in equity.
    pub changes_in_equity: ChangesInEquityReport,
    /// General ledger.
    pub general_ledger: GeneralLedgerReport,
}
