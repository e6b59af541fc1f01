//! Report generation service.
//!
//! Every statement is a pure function of the balance projection plus the
//! chart of accounts; nothing is cached between calls. [`ReportService::generate_all`]
//! re-reads the store on every invocation, so concurrent writers are always
//! reflected in the next bundle.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use saldo_shared::AccountCode;
use tracing::debug;

use super::contra::ContraLinker;
use super::ledger_view::build_general_ledger;
use super::types::{
    AdjustedTrialBalanceReport, AdjustedTrialBalanceRow, ChangesInEquityReport, ContraReduction,
    EquityOpeningRow, FinancialPositionReport, IncomeStatementLine, IncomeStatementReport,
    PositionLine, ReportBundle, TrialBalanceReport, TrialBalanceRow, TrialBalanceTotals,
};
use crate::ledger::account::{Account, ChartOfAccounts};
use crate::ledger::balance::{BalanceSet, calculate_balances};
use crate::ledger::entry::{Entry, JournalKind};
use crate::ledger::error::LedgerError;
use crate::ledger::journal::JournalService;
use crate::ledger::registry::AccountRegistry;
use crate::storage::LedgerStore;

/// Service for generating the derived statements.
pub struct ReportService;

impl ReportService {
    /// Generates the trial balance: raw debit/credit totals for every
    /// account with activity.
    #[must_use]
    pub fn trial_balance(balances: &BalanceSet) -> TrialBalanceReport {
        let rows: Vec<TrialBalanceRow> = balances
            .iter()
            .filter(|balance| balance.has_activity())
            .map(|balance| TrialBalanceRow {
                account: balance.code.clone(),
                name: balance.name.clone(),
                debit: balance.debit,
                credit: balance.credit,
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|row| row.debit).sum();
        let total_credit: Decimal = rows.iter().map(|row| row.credit).sum();

        TrialBalanceReport {
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates the adjusted trial balance: every account with activity or
    /// a nonzero balance, with the signed balance column.
    #[must_use]
    pub fn adjusted_trial_balance(balances: &BalanceSet) -> AdjustedTrialBalanceReport {
        let rows: Vec<AdjustedTrialBalanceRow> = balances
            .iter()
            .filter(|balance| balance.balance != Decimal::ZERO || balance.has_activity())
            .map(|balance| AdjustedTrialBalanceRow {
                account: balance.code.clone(),
                name: balance.name.clone(),
                debit: balance.debit,
                credit: balance.credit,
                balance: balance.balance,
            })
            .collect();

        let total_debit: Decimal = rows.iter().map(|row| row.debit).sum();
        let total_credit: Decimal = rows.iter().map(|row| row.credit).sum();

        AdjustedTrialBalanceReport {
            rows,
            totals: TrialBalanceTotals {
                total_debit,
                total_credit,
                is_balanced: total_debit == total_credit,
            },
        }
    }

    /// Generates the income statement over all revenue and expense accounts.
    #[must_use]
    pub fn income_statement(
        chart: &ChartOfAccounts,
        balances: &BalanceSet,
    ) -> IncomeStatementReport {
        let line = |account: &Account| IncomeStatementLine {
            account: account.code.clone(),
            name: account.name.clone(),
            amount: balances.balance_or_zero(&account.code),
        };

        let revenues: Vec<IncomeStatementLine> = chart.revenue.iter().map(line).collect();
        let expenses: Vec<IncomeStatementLine> = chart.expenses.iter().map(line).collect();

        let total_revenue: Decimal = revenues.iter().map(|l| l.amount).sum();
        let total_expenses: Decimal = expenses.iter().map(|l| l.amount).sum();

        IncomeStatementReport {
            revenues,
            expenses,
            total_revenue,
            total_expenses,
            net_income: total_revenue - total_expenses,
        }
    }

    /// Generates the statement of financial position.
    ///
    /// Contra accounts are discovered per section through the injected
    /// linker and netted against their parent; the identity
    /// `assets == liabilities + equity` is recorded in `is_balanced`.
    #[must_use]
    pub fn financial_position(
        chart: &ChartOfAccounts,
        balances: &BalanceSet,
        linker: &dyn ContraLinker,
    ) -> FinancialPositionReport {
        let assets = Self::position_section(&chart.assets, balances, linker);
        let liabilities = Self::position_section(&chart.liabilities, balances, linker);
        let equity = Self::position_section(&chart.equity, balances, linker);

        let section_total =
            |lines: &[PositionLine]| lines.iter().map(|line| line.net_amount).sum::<Decimal>();

        let total_assets = section_total(&assets);
        let total_liabilities = section_total(&liabilities);
        let net_income = Self::income_statement(chart, balances).net_income;
        let total_equity = section_total(&equity) + net_income;

        FinancialPositionReport {
            assets,
            liabilities,
            equity,
            total_assets,
            total_liabilities,
            total_equity,
            net_income,
            is_balanced: total_assets == total_liabilities + total_equity,
        }
    }

    /// Generates the statement of changes in equity.
    ///
    /// Discovers equity accounts (excluding the designated retained-earnings
    /// account) that appear in at least one journal line, and reconstructs
    /// each opening contribution by reversing the adjustment-collection
    /// movements out of the current balance, floored at zero. Movements in
    /// the transactions collection fold into the opening figure - a known
    /// simplification, kept for parity with the source system.
    #[must_use]
    pub fn changes_in_equity(
        chart: &ChartOfAccounts,
        balances: &BalanceSet,
        transactions: &[Entry],
        adjustments: &[Entry],
        retained_earnings: &AccountCode,
    ) -> ChangesInEquityReport {
        let mut openings = Vec::new();

        for account in &chart.equity {
            if &account.code == retained_earnings {
                continue;
            }
            let appears = transactions
                .iter()
                .chain(adjustments)
                .flat_map(|entry| entry.lines.iter())
                .any(|line| line.account == account.code);
            if !appears {
                continue;
            }

            let (adj_debits, adj_credits) = adjustments
                .iter()
                .flat_map(|entry| entry.lines.iter())
                .filter(|line| line.account == account.code)
                .fold((Decimal::ZERO, Decimal::ZERO), |(debits, credits), line| {
                    (debits + line.debit, credits + line.credit)
                });

            let balance = balances.balance_or_zero(&account.code);
            let opening = (balance - adj_credits + adj_debits).max(Decimal::ZERO);

            openings.push(EquityOpeningRow {
                account: account.code.clone(),
                name: account.name.clone(),
                opening_balance: opening,
            });
        }

        let total_opening_capital: Decimal = openings.iter().map(|row| row.opening_balance).sum();
        let net_income = Self::income_statement(chart, balances).net_income;

        ChangesInEquityReport {
            openings,
            total_opening_capital,
            net_income,
            total_equity: total_opening_capital + net_income,
        }
    }

    /// Generates every statement from a fresh store snapshot.
    ///
    /// # Errors
    ///
    /// Returns `Storage` if any collection cannot be read.
    pub fn generate_all(
        store: &dyn LedgerStore,
        retained_earnings: &AccountCode,
        linker: &dyn ContraLinker,
    ) -> Result<ReportBundle, LedgerError> {
        let chart = AccountRegistry::chart(store)?;
        let transactions = JournalService::list(store, JournalKind::Transactions)?;
        let adjustments = JournalService::list(store, JournalKind::Adjustments)?;
        let metadata = store.load_metadata()?;

        let accounts: Vec<Account> = chart.iter().cloned().collect();
        let balances = calculate_balances(&accounts, &transactions, &adjustments);

        debug!(
            accounts = accounts.len(),
            transactions = transactions.len(),
            adjustments = adjustments.len(),
            "Generating report bundle"
        );

        Ok(ReportBundle {
            trial_balance: Self::trial_balance(&balances),
            adjusted_trial_balance: Self::adjusted_trial_balance(&balances),
            income_statement: Self::income_statement(&chart, &balances),
            financial_position: Self::financial_position(&chart, &balances, linker),
            changes_in_equity: Self::changes_in_equity(
                &chart,
                &balances,
                &transactions,
                &adjustments,
                retained_earnings,
            ),
            general_ledger: build_general_ledger(&chart, &transactions, &adjustments),
            metadata,
        })
    }

    fn position_section(
        accounts: &[Account],
        balances: &BalanceSet,
        linker: &dyn ContraLinker,
    ) -> Vec<PositionLine> {
        let mut linked: BTreeMap<AccountCode, Vec<&Account>> = BTreeMap::new();
        let mut standalone: Vec<&AccountCode> = Vec::new();

        for contra in accounts.iter().filter(|account| account.is_contra) {
            match linker.find_parent(contra, accounts) {
                Some(parent) => linked.entry(parent.code.clone()).or_default().push(contra),
                None => standalone.push(&contra.code),
            }
        }

        let mut lines = Vec::new();
        for account in accounts {
            let amount = balances.balance_or_zero(&account.code);

            if account.is_contra {
                // Linked contras render nested under their parent.
                if standalone.contains(&&account.code) {
                    lines.push(PositionLine {
                        account: account.code.clone(),
                        name: account.name.clone(),
                        amount,
                        contra_accounts: Vec::new(),
                        net_amount: amount,
                        is_contra: true,
                    });
                }
                continue;
            }

            let contra_accounts: Vec<ContraReduction> = linked
                .get(&account.code)
                .map(|contras| {
                    contras
                        .iter()
                        .map(|contra| ContraReduction {
                            account: contra.code.clone(),
                            name: contra.name.clone(),
                            reduction: -balances.balance_or_zero(&contra.code),
                        })
                        .collect()
                })
                .unwrap_or_default();

            let reductions: Decimal = contra_accounts.iter().map(|c| c.reduction).sum();

            lines.push(PositionLine {
                account: account.code.clone(),
                name: account.name.clone(),
                amount,
                net_amount: amount - reductions,
                contra_accounts,
                is_contra: false,
            });
        }

        lines
    }
}
