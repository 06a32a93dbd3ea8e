//! Pure aggregation over a transaction slice.
//!
//! Nothing here touches storage or keeps state; every function is
//! deterministic for its inputs (the `*_on` variants take "today" explicitly,
//! the plain ones read the local clock).

mod format;

use chrono::{Datelike, Duration, Local, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{Category, Transaction, TransactionType};

pub(crate) use format::{
    category_color, category_color_for_key, category_display_name, format_currency, format_date,
};

pub(crate) const DEFAULT_RECENT_LIMIT: usize = 5;
pub(crate) const DEFAULT_TREND_DAYS: u32 = 7;
/// Longest trend window, about ten years of days.
pub(crate) const MAX_TREND_DAYS: u32 = 3660;

/// Time bucket used to group transactions for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bucket {
    /// `Jan 05`
    Daily,
    /// ISO week number, e.g. `1`
    Weekly,
    /// `Jan`
    Monthly,
}

impl Bucket {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "daily" | "day" | "d" => Some(Self::Daily),
            "weekly" | "week" | "w" => Some(Self::Weekly),
            "monthly" | "month" | "m" => Some(Self::Monthly),
            _ => None,
        }
    }

    pub(crate) fn label(&self, date: NaiveDate) -> String {
        match self {
            Self::Daily => day_label(date),
            Self::Weekly => date.iso_week().week().to_string(),
            Self::Monthly => date.format("%b").to_string(),
        }
    }
}

fn day_label(date: NaiveDate) -> String {
    date.format("%b %d").to_string()
}

/// Add `amount` to the entry for `key`, appending it if unseen.
fn accumulate<K: PartialEq>(entries: &mut Vec<(K, Decimal)>, key: K, amount: Decimal) {
    match entries.iter_mut().find(|(k, _)| *k == key) {
        Some((_, total)) => *total += amount,
        None => entries.push((key, amount)),
    }
}

pub(crate) fn total_by_type(transactions: &[Transaction], kind: TransactionType) -> Decimal {
    transactions
        .iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}

/// Income minus expenses. Negative when spending exceeds income.
pub(crate) fn balance(transactions: &[Transaction]) -> Decimal {
    total_by_type(transactions, TransactionType::Income)
        - total_by_type(transactions, TransactionType::Expense)
}

/// Budget left to spend, clamped at zero. Use [`over_budget`] for the overshoot.
pub(crate) fn remaining_budget(budget: Decimal, expense_total: Decimal) -> Decimal {
    (budget - expense_total).max(Decimal::ZERO)
}

pub(crate) fn over_budget(budget: Decimal, expense_total: Decimal) -> Decimal {
    (expense_total - budget).max(Decimal::ZERO)
}

/// Share of the budget spent, capped at 100. Zero when there is no positive budget.
pub(crate) fn budget_usage_percent(budget: Decimal, expense_total: Decimal) -> Decimal {
    if budget <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    expense_total
        .checked_div(budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(Decimal::ONE_HUNDRED)
        .min(Decimal::ONE_HUNDRED)
}

/// Budget-vs-spend figures for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BudgetSummary {
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub over: Decimal,
    pub percent_used: Decimal,
}

impl BudgetSummary {
    pub(crate) fn new(budget: Decimal, transactions: &[Transaction]) -> Self {
        let spent = total_by_type(transactions, TransactionType::Expense);
        Self {
            budget,
            spent,
            remaining: remaining_budget(budget, spent),
            over: over_budget(budget, spent),
            percent_used: budget_usage_percent(budget, spent),
        }
    }

    pub(crate) fn is_over(&self) -> bool {
        self.over > Decimal::ZERO
    }
}

/// Most recent first, at most `limit` entries. Equal dates keep insertion order.
pub(crate) fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted.truncate(limit);
    sorted
}

/// Summed amount per category, in first-seen order.
pub(crate) fn group_by_category(transactions: &[Transaction]) -> Vec<(Category, Decimal)> {
    let mut grouped = Vec::new();
    for t in transactions {
        accumulate(&mut grouped, t.category, t.amount);
    }
    grouped
}

/// Summed amount per bucket label, in first-seen order.
pub(crate) fn group_by_date_bucket(
    transactions: &[Transaction],
    bucket: Bucket,
) -> Vec<(String, Decimal)> {
    let mut grouped = Vec::new();
    for t in transactions {
        accumulate(&mut grouped, bucket.label(t.date.date_naive()), t.amount);
    }
    grouped
}

/// Daily expense totals for the `window_days` days ending today.
pub(crate) fn expense_trend(transactions: &[Transaction], window_days: u32) -> Vec<(String, Decimal)> {
    expense_trend_on(transactions, window_days, Local::now().date_naive())
}

/// Daily expense totals for the `window_days` days ending on `today`, oldest
/// first. Every day in the window is present, zero when nothing was spent.
/// The window is capped at [`MAX_TREND_DAYS`] and never reaches before the
/// earliest representable date.
pub(crate) fn expense_trend_on(
    transactions: &[Transaction],
    window_days: u32,
    today: NaiveDate,
) -> Vec<(String, Decimal)> {
    let window_days = window_days.min(MAX_TREND_DAYS);
    if window_days == 0 {
        return Vec::new();
    }
    let Some(start) = today.checked_sub_signed(Duration::days(i64::from(window_days) - 1)) else {
        return Vec::new();
    };
    let mut totals = vec![Decimal::ZERO; window_days as usize];

    for t in transactions.iter().filter(|t| t.is_expense()) {
        let day = t.date.date_naive();
        if day < start || day > today {
            continue;
        }
        let offset = (day - start).num_days() as usize;
        if let Some(total) = totals.get_mut(offset) {
            *total += t.amount;
        }
    }

    totals
        .into_iter()
        .enumerate()
        .map(|(i, total)| (day_label(start + Duration::days(i as i64)), total))
        .collect()
}

/// Fresh opaque id for a new transaction.
pub(crate) fn generate_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
