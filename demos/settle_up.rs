//! Settle-up walkthrough for a weekend trip

use bigdecimal::BigDecimal;
use settle_core::{
    format_usd, BalanceStatus, ExpenseBuilder, ExpenseCategory, SettlementConfig, SettlementEngine,
};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("settle_core=debug")),
        )
        .init();

    println!("🧾 Settle Core - Weekend Trip Example\n");

    let expenses = vec![
        ExpenseBuilder::new("Cabin rental", BigDecimal::from(480), "ana")
            .split_equally(["ben", "chloe", "dev"])
            .category(ExpenseCategory::Accommodation)
            .trip("weekend")
            .build()?,
        ExpenseBuilder::new("Groceries", BigDecimal::from_str("96.30")?, "ben")
            .split_equally(["ana", "chloe"])
            .category(ExpenseCategory::Food)
            .trip("weekend")
            .build()?,
        ExpenseBuilder::new("Fuel", BigDecimal::from_str("58.00")?, "dev")
            .participant("dev", BigDecimal::from_str("0.5")?)
            .participant("chloe", BigDecimal::from_str("0.5")?)
            .category(ExpenseCategory::Transport)
            .trip("weekend")
            .build()?,
    ];

    for expense in &expenses {
        println!(
            "  ✓ {} paid {} for {}",
            expense.payor_id,
            format_usd(&expense.amount),
            expense.title
        );
    }
    println!();

    let engine = SettlementEngine::new(SettlementConfig::default());
    let report = engine.settle_trip(&expenses, "weekend");

    println!("📊 Net balances (total spent {})", report.format_amount(&report.total_spent)?);
    for balance in &report.balances {
        let status = match BalanceStatus::of(&balance.net, &report.display_threshold) {
            BalanceStatus::Owed => "is owed",
            BalanceStatus::Owes => "owes",
            BalanceStatus::Settled => "is settled",
        };
        println!(
            "  {:<6} {} {}",
            balance.user_id,
            status,
            report.format_amount(&balance.net.abs())?
        );
    }
    println!();

    println!("💸 Payments to settle up");
    for txn in &report.transactions {
        println!(
            "  {} → {}: {}",
            txn.from_user_id,
            txn.to_user_id,
            report.format_amount(&txn.amount)?
        );
    }
    println!();

    let view = report.view_for("chloe");
    println!(
        "👤 chloe: {} payment(s) to make, {} between others",
        view.payments_due().count(),
        view.other_transactions.len()
    );

    Ok(())
}
