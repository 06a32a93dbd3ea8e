use anyhow::{Context, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::{Category, Transaction, TransactionType};
use crate::settings::Command;
use crate::stats::{self, Bucket, BudgetSummary};
use crate::storage::Storage;
use crate::store::{Committed, ExpenseStore};

pub(crate) fn as_cli<S: Storage>(command: Command, store: &mut ExpenseStore<S>) -> Result<()> {
    if store.is_loading() {
        anyhow::bail!("Ledger is still loading");
    }
    match command {
        Command::Summary => cli_summary(store),
        Command::List { limit, kind } => cli_list(store, limit, kind.as_deref()),
        Command::Add {
            amount,
            category,
            kind,
            note,
        } => cli_add(store, &amount, &category, &kind, note),
        Command::Delete { id } => cli_delete(store, &id),
        Command::Budget { amount } => cli_budget(store, amount.as_deref()),
        Command::Report { by, days } => cli_report(store, &by, days),
        Command::Categories => {
            cli_categories();
            Ok(())
        }
    }
}

/// Parse a user-entered amount, tolerating a leading `$` and thousand separators.
pub(crate) fn parse_amount(input: &str) -> Result<Decimal> {
    let cleaned: String = input
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    Decimal::from_str(&cleaned).with_context(|| format!("Invalid amount: {input}"))
}

fn parse_kind(input: &str) -> Result<TransactionType> {
    TransactionType::parse(input)
        .ok_or_else(|| anyhow::anyhow!("Unknown type '{input}' (expected expense or income)"))
}

fn report_persistence<T>(committed: &Committed<T>) {
    if let Some(err) = committed.persistence.error() {
        eprintln!("Warning: {err}. Changes are kept for this session only.");
    } else if !committed.persistence.is_saved() {
        tracing::warn!("change was not saved");
    }
}

fn print_row(txn: &Transaction) {
    let sign = if txn.is_income() { "+" } else { "-" };
    println!(
        "{:<32} {:<12} {:<14} {:>1}{:>12}  {}",
        txn.id,
        stats::format_date(&txn.date),
        stats::category_display_name(txn.category),
        sign,
        stats::format_currency(txn.amount),
        txn.note.as_deref().unwrap_or(""),
    );
}

fn cli_summary<S: Storage>(store: &ExpenseStore<S>) -> Result<()> {
    let txns = store.transactions();
    let income = stats::total_by_type(txns, TransactionType::Income);
    let expenses = stats::total_by_type(txns, TransactionType::Expense);
    let budget = BudgetSummary::new(store.budget(), txns);

    println!("PocketLedger");
    println!("{}", "─".repeat(40));
    println!("  Income:     {}", stats::format_currency(income));
    println!("  Expenses:   {}", stats::format_currency(expenses));
    println!("  Balance:    {}", stats::format_currency(stats::balance(txns)));
    println!();
    println!("  Monthly budget: {}", stats::format_currency(budget.budget));
    if budget.is_over() {
        println!("  Over budget by {}", stats::format_currency(budget.over));
    } else {
        println!("  {} remaining", stats::format_currency(budget.remaining));
    }
    println!("  {}% used", budget.percent_used.round());

    println!();
    let recent = stats::recent_transactions(txns, stats::DEFAULT_RECENT_LIMIT);
    if recent.is_empty() {
        println!("No transactions yet. Add one with `pocketledger add <amount> <category>`.");
    } else {
        println!("Recent Transactions:");
        for txn in recent {
            print_row(txn);
        }
    }
    Ok(())
}

fn cli_list<S: Storage>(store: &ExpenseStore<S>, limit: usize, kind: Option<&str>) -> Result<()> {
    let kind = kind.map(parse_kind).transpose()?;
    let filtered: Vec<Transaction> = store
        .transactions()
        .iter()
        .filter(|t| kind.is_none_or(|k| t.kind == k))
        .cloned()
        .collect();

    let rows = stats::recent_transactions(&filtered, limit);
    if rows.is_empty() {
        println!("No transactions");
        return Ok(());
    }
    println!(
        "{:<32} {:<12} {:<14} {:>13}  Note",
        "ID", "Date", "Category", "Amount"
    );
    println!("{}", "─".repeat(84));
    for txn in rows {
        print_row(txn);
    }
    Ok(())
}

fn cli_add<S: Storage>(
    store: &mut ExpenseStore<S>,
    amount: &str,
    category: &str,
    kind: &str,
    note: Option<String>,
) -> Result<()> {
    let amount = parse_amount(amount)?;
    let kind = parse_kind(kind)?;
    let category = Category::parse(category).ok_or_else(|| {
        let valid: Vec<&str> = Category::for_type(kind).iter().map(|c| c.as_str()).collect();
        anyhow::anyhow!(
            "Unknown category '{category}'. {} categories: {}",
            kind.label(),
            valid.join(", ")
        )
    })?;

    let committed = store.add_transaction(amount, category, kind, note)?;
    println!(
        "{} of {} has been added ({})",
        kind.label(),
        stats::format_currency(committed.value.amount),
        committed.value.id
    );
    report_persistence(&committed);
    Ok(())
}

fn cli_delete<S: Storage>(store: &mut ExpenseStore<S>, id: &str) -> Result<()> {
    let committed = store.delete_transaction(id);
    match &committed.value {
        Some(_) => println!("The transaction has been removed"),
        None => println!("No transaction with id {id}"),
    }
    report_persistence(&committed);
    Ok(())
}

fn cli_budget<S: Storage>(store: &mut ExpenseStore<S>, amount: Option<&str>) -> Result<()> {
    let Some(amount) = amount else {
        println!("Monthly budget: {}", stats::format_currency(store.budget()));
        return Ok(());
    };

    let amount = parse_amount(amount)?;
    if amount < Decimal::ZERO {
        anyhow::bail!("Budget cannot be negative");
    }
    let committed = store.set_budget(amount);
    println!(
        "Your monthly budget has been set to {}",
        stats::format_currency(store.budget())
    );
    report_persistence(&committed);
    Ok(())
}

fn cli_report<S: Storage>(store: &ExpenseStore<S>, by: &str, days: u32) -> Result<()> {
    let bucket = Bucket::parse(by)
        .ok_or_else(|| anyhow::anyhow!("Unknown period '{by}' (expected daily, weekly or monthly)"))?;
    let expenses: Vec<Transaction> = store
        .transactions()
        .iter()
        .filter(|t| t.is_expense())
        .cloned()
        .collect();
    let total = stats::total_by_type(&expenses, TransactionType::Expense);

    println!("Total expenses: {}", stats::format_currency(total));

    let by_category = stats::group_by_category(&expenses);
    if !by_category.is_empty() {
        println!();
        println!("Spending by Category:");
        for (category, amount) in &by_category {
            let share = (*amount * Decimal::ONE_HUNDRED)
                .checked_div(total)
                .unwrap_or(Decimal::ZERO)
                .round();
            println!(
                "  {:<16} {:>12}  {:>3}%  {}",
                stats::category_display_name(*category),
                stats::format_currency(*amount),
                share,
                stats::category_color(*category),
            );
        }
    }

    let by_period = stats::group_by_date_bucket(&expenses, bucket);
    if !by_period.is_empty() {
        println!();
        let heading = match bucket {
            Bucket::Daily => "Spending by Day:",
            Bucket::Weekly => "Spending by Week:",
            Bucket::Monthly => "Spending by Month:",
        };
        println!("{heading}");
        for (label, amount) in &by_period {
            let label = match bucket {
                Bucket::Weekly => format!("Week {label}"),
                _ => label.clone(),
            };
            println!("  {label:<16} {:>12}", stats::format_currency(*amount));
        }
    }

    println!();
    println!("Last {days} days:");
    for (day, amount) in stats::expense_trend(store.transactions(), days) {
        println!("  {day:<16} {:>12}", stats::format_currency(amount));
    }
    Ok(())
}

fn cli_categories() {
    for kind in [TransactionType::Expense, TransactionType::Income] {
        println!("{} categories:", kind.label());
        for category in Category::for_type(kind) {
            let marker = if *category == Category::default_for(kind) {
                " (default)"
            } else {
                ""
            };
            println!(
                "  {:<16} {}{marker}",
                stats::category_display_name(*category),
                stats::category_color_for_key(category.as_str()),
            );
        }
        println!();
    }
}
