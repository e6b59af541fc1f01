//! Sample-ledger seeder for Saldo development and demos.
//!
//! Seeds the demo ledger (CV ABC, January 2024) into the configured JSON
//! store: an 18-account chart, seven transactions, five adjusting entries,
//! and report metadata, then generates the statement bundle and logs the
//! headline totals. Seeding is skipped when the data directory already holds
//! a chart of accounts.
//!
//! Usage: cargo run --bin seeder

use anyhow::Context;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use saldo_core::ledger::{
    AccountKind, AccountRegistry, EntryDraft, JournalKind, JournalLine, JournalService, NewAccount,
    ReportMetadata,
};
use saldo_core::reports::{CodeProximityLinker, ReportService};
use saldo_core::storage::LedgerStore;
use saldo_shared::{AccountCode, AppConfig};
use saldo_store_json::JsonFileStore;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "saldo_core=info,saldo_store_json=info,seeder=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().context("Failed to load configuration")?;
    let store = JsonFileStore::from_config(&config.storage)?;
    info!(data_dir = %store.data_dir().display(), "Opened ledger store");

    if !store.load_accounts()?.is_empty() {
        info!("Chart of accounts already present, skipping seed");
        return Ok(());
    }

    seed_chart(&store)?;
    seed_transactions(&store)?;
    seed_adjustments(&store)?;
    store.save_metadata(&ReportMetadata {
        company_name: "CV ABC".to_string(),
        period_label: "January 2024".to_string(),
        prepared_by: "Saldo seeder".to_string(),
    })?;

    let bundle = ReportService::generate_all(
        &store,
        &config.ledger.retained_earnings,
        &CodeProximityLinker::default(),
    )?;

    info!(
        total_debit = %bundle.trial_balance.totals.total_debit,
        total_credit = %bundle.trial_balance.totals.total_credit,
        "Trial balance"
    );
    info!(
        total_assets = %bundle.financial_position.total_assets,
        total_liabilities = %bundle.financial_position.total_liabilities,
        total_equity = %bundle.financial_position.total_equity,
        balanced = bundle.financial_position.is_balanced,
        "Financial position"
    );
    info!(net_income = %bundle.income_statement.net_income, "Income statement");
    info!("Seeding complete");

    Ok(())
}

fn code(text: &str) -> AccountCode {
    text.parse().expect("seed account codes are well-formed")
}

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, day).expect("seed dates are valid")
}

/// Seeds the demo chart of accounts.
fn seed_chart(store: &dyn LedgerStore) -> anyhow::Result<()> {
    let chart: [(&str, &str, AccountKind, bool); 18] = [
        ("1-100", "Petty cash", AccountKind::Asset, false),
        ("1-110", "Bank", AccountKind::Asset, false),
        ("1-140", "Office supplies", AccountKind::Asset, false),
        ("1-150", "Prepaid rent", AccountKind::Asset, false),
        ("1-230", "Vehicle", AccountKind::Asset, false),
        ("1-240", "Accumulated depreciation - vehicle", AccountKind::Asset, true),
        ("2-110", "Salaries payable", AccountKind::Liability, false),
        ("2-120", "Other payables", AccountKind::Liability, false),
        ("2-130", "Unearned revenue", AccountKind::Liability, false),
        ("2-210", "Bank loan", AccountKind::Liability, false),
        ("3-101", "Capital - Amin", AccountKind::Equity, false),
        ("3-102", "Capital - Fawzi", AccountKind::Equity, false),
        ("3-200", "Retained earnings", AccountKind::Equity, false),
        ("4-100", "Service revenue", AccountKind::Revenue, false),
        ("5-100", "Salary expense", AccountKind::Expense, false),
        ("5-110", "Office rent expense", AccountKind::Expense, false),
        ("5-120", "Utilities and internet expense", AccountKind::Expense, false),
        ("5-130", "Vehicle depreciation expense", AccountKind::Expense, false),
    ];

    for (account_code, name, kind, is_contra) in chart {
        AccountRegistry::add(
            store,
            NewAccount {
                code: account_code.to_string(),
                name: name.to_string(),
                kind,
                is_contra,
            },
        )?;
    }

    info!(accounts = chart.len(), "Chart of accounts seeded");
    Ok(())
}

/// Seeds the January 2024 journal transactions.
fn seed_transactions(store: &dyn LedgerStore) -> anyhow::Result<()> {
    let transactions: [(u32, &str, Vec<JournalLine>); 7] = [
        (
            1,
            "Initial capital contributions from Amin and Fawzi",
            vec![
                debit("1-110", dec!(100_000_000)),
                credit("3-101", dec!(60_000_000)),
                credit("3-102", dec!(40_000_000)),
            ],
        ),
        (
            1,
            "Office rent paid for one year",
            vec![
                debit("1-150", dec!(24_000_000)),
                credit("1-110", dec!(24_000_000)),
            ],
        ),
        (
            1,
            "Vehicle purchase, partly financed by bank loan",
            vec![
                debit("1-230", dec!(200_000_000)),
                credit("1-110", dec!(40_000_000)),
                credit("2-210", dec!(160_000_000)),
            ],
        ),
        (
            2,
            "Office supplies purchased",
            vec![
                debit("1-140", dec!(10_000_000)),
                credit("1-110", dec!(10_000_000)),
            ],
        ),
        (
            2,
            "Cash withdrawn for petty cash",
            vec![
                debit("1-100", dec!(1_000_000)),
                credit("1-110", dec!(1_000_000)),
            ],
        ),
        (
            4,
            "First consulting payment received from PT HIJ",
            vec![
                debit("1-110", dec!(10_000_000)),
                credit("4-100", dec!(10_000_000)),
            ],
        ),
        (
            31,
            "Final consulting payment received from PT HIJ",
            vec![
                debit("1-110", dec!(20_000_000)),
                credit("4-100", dec!(20_000_000)),
            ],
        ),
    ];

    let count = transactions.len();
    for (day, description, lines) in transactions {
        JournalService::add(
            store,
            JournalKind::Transactions,
            EntryDraft {
                date: date(day),
                description: description.to_string(),
                lines,
            },
        )?;
    }

    info!(entries = count, "Transactions seeded");
    Ok(())
}

/// Seeds the period-end adjusting entries.
fn seed_adjustments(store: &dyn LedgerStore) -> anyhow::Result<()> {
    let adjustments: [(&str, Vec<JournalLine>); 5] = [
        (
            "Unrecorded salaries",
            vec![
                debit("5-100", dec!(10_000_000)),
                credit("2-110", dec!(10_000_000)),
            ],
        ),
        (
            "Unrecorded utilities and internet bills",
            vec![
                debit("5-120", dec!(5_000_000)),
                credit("2-120", dec!(5_000_000)),
            ],
        ),
        (
            "Vehicle depreciation for the month",
            vec![
                debit("5-130", dec!(1_600_000)),
                credit("1-240", dec!(1_600_000)),
            ],
        ),
        (
            "Office supplies used",
            vec![
                debit("5-120", dec!(2_000_000)),
                credit("1-140", dec!(2_000_000)),
            ],
        ),
        (
            "Office rent for January (one twelfth of the prepayment)",
            vec![
                debit("5-110", dec!(2_000_000)),
                credit("1-150", dec!(2_000_000)),
            ],
        ),
    ];

    let count = adjustments.len();
    for (description, lines) in adjustments {
        JournalService::add(
            store,
            JournalKind::Adjustments,
            EntryDraft {
                date: date(31),
                description: description.to_string(),
                lines,
            },
        )?;
    }

    info!(entries = count, "Adjusting entries seeded");
    Ok(())
}

fn debit(account: &str, amount: Decimal) -> JournalLine {
    JournalLine::debit(code(account), amount)
}

fn credit(account: &str, amount: Decimal) -> JournalLine {
    JournalLine::credit(code(account), amount)
}
