use chrono::{DateTime, Duration, Local};
use rust_decimal::Decimal;

use crate::models::{Category, Transaction, TransactionType};
use crate::stats::generate_id;

fn demo(
    amount: Decimal,
    category: Category,
    kind: TransactionType,
    date: DateTime<Local>,
    note: &str,
) -> Transaction {
    Transaction {
        id: generate_id(),
        amount,
        category,
        date,
        note: Some(note.to_string()),
        kind,
    }
}

/// Sample ledger shown on first launch: three recent expenses and a salary.
pub(crate) fn demo_transactions(now: DateTime<Local>) -> Vec<Transaction> {
    let yesterday = now - Duration::days(1);
    let two_days_ago = now - Duration::days(2);
    vec![
        demo(
            Decimal::new(4599, 2),
            Category::Food,
            TransactionType::Expense,
            now,
            "Grocery shopping",
        ),
        demo(
            Decimal::new(2550, 2),
            Category::Transport,
            TransactionType::Expense,
            yesterday,
            "Uber ride",
        ),
        demo(
            Decimal::new(12000, 2),
            Category::Bills,
            TransactionType::Expense,
            two_days_ago,
            "Electricity bill",
        ),
        demo(
            Decimal::new(250000, 2),
            Category::Salary,
            TransactionType::Income,
            two_days_ago,
            "Monthly salary",
        ),
    ]
}
