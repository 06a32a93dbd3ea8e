#![allow(clippy::unwrap_used)]

use chrono::{Local, TimeZone};
use rust_decimal_macros::dec;

use super::*;

// ── TransactionType ───────────────────────────────────────────

#[test]
fn test_transaction_type_parse() {
    assert_eq!(TransactionType::parse("expense"), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("EXPENSE"), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("e"), Some(TransactionType::Expense));
    assert_eq!(TransactionType::parse("income"), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse(" Income "), Some(TransactionType::Income));
    assert_eq!(TransactionType::parse("transfer"), None);
}

#[test]
fn test_transaction_type_labels() {
    assert_eq!(TransactionType::Expense.as_str(), "expense");
    assert_eq!(TransactionType::Income.label(), "Income");
    assert_eq!(format!("{}", TransactionType::Income), "income");
}

// ── Category ──────────────────────────────────────────────────

#[test]
fn test_category_sets() {
    assert_eq!(Category::expense_categories().len(), 8);
    assert_eq!(Category::income_categories().len(), 5);

    let overlap: Vec<_> = Category::expense_categories()
        .iter()
        .filter(|c| Category::income_categories().contains(c))
        .collect();
    assert_eq!(overlap, vec![&Category::Other]);
}

#[test]
fn test_category_allows() {
    assert!(Category::Food.allows(TransactionType::Expense));
    assert!(!Category::Food.allows(TransactionType::Income));
    assert!(Category::Salary.allows(TransactionType::Income));
    assert!(!Category::Salary.allows(TransactionType::Expense));
    assert!(Category::Other.allows(TransactionType::Expense));
    assert!(Category::Other.allows(TransactionType::Income));
}

#[test]
fn test_category_roundtrip() {
    for kind in [TransactionType::Expense, TransactionType::Income] {
        for c in Category::for_type(kind) {
            assert_eq!(Category::parse(c.as_str()), Some(*c), "Roundtrip failed for {c}");
        }
    }
}

#[test]
fn test_category_parse_unknown() {
    assert_eq!(Category::parse("groceries"), None);
    assert_eq!(Category::parse(""), None);
    assert_eq!(Category::parse("FOOD"), Some(Category::Food));
}

#[test]
fn test_category_default_for() {
    assert_eq!(Category::default_for(TransactionType::Expense), Category::Food);
    assert_eq!(Category::default_for(TransactionType::Income), Category::Salary);
}

// ── Transaction ───────────────────────────────────────────────

fn make_txn(kind: TransactionType) -> Transaction {
    Transaction {
        id: "abc123".into(),
        amount: dec!(45.99),
        category: Category::Other,
        date: Local.with_ymd_and_hms(2024, 1, 5, 12, 30, 0).unwrap(),
        note: None,
        kind,
    }
}

#[test]
fn test_income_expense_flags() {
    let txn = make_txn(TransactionType::Income);
    assert!(txn.is_income());
    assert!(!txn.is_expense());

    let txn = make_txn(TransactionType::Expense);
    assert!(txn.is_expense());
    assert!(!txn.is_income());
}

#[test]
fn test_transaction_json_shape() {
    let txn = make_txn(TransactionType::Expense);
    let value = serde_json::to_value(&txn).unwrap();
    assert_eq!(value["id"], "abc123");
    assert_eq!(value["amount"], 45.99);
    assert_eq!(value["category"], "other");
    assert_eq!(value["type"], "expense");
    assert!(value["note"].is_null());
    assert!(value["date"].is_string());
}

#[test]
fn test_transaction_json_missing_note() {
    let json = r#"{"id":"x","amount":12,"category":"gift","date":"2024-03-01T10:00:00Z","type":"income"}"#;
    let txn: Transaction = serde_json::from_str(json).unwrap();
    assert_eq!(txn.amount, dec!(12));
    assert_eq!(txn.category, Category::Gift);
    assert_eq!(txn.kind, TransactionType::Income);
    assert!(txn.note.is_none());
}
