use chrono::{DateTime, Local};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::models::Category;

/// Format a decimal amount as dollars with thousand separators and 2 decimal places.
/// e.g. `1234567.89` → `"$1,234,567.89"`, `-42.5` → `"-$42.50"`
pub(crate) fn format_currency(val: Decimal) -> String {
    let rounded = val.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let formatted = format!("{:.2}", rounded.abs());
    let (int_part, dec_part) = formatted.split_once('.').unwrap_or((formatted.as_str(), "00"));

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if rounded < Decimal::ZERO {
        format!("-${with_commas}.{dec_part}")
    } else {
        format!("${with_commas}.{dec_part}")
    }
}

/// Short date label, e.g. `Jan 05, 2024`.
pub(crate) fn format_date(date: &DateTime<Local>) -> String {
    date.format("%b %d, %Y").to_string()
}

/// Category key with its first letter capitalized.
pub(crate) fn category_display_name(category: Category) -> String {
    let key = category.as_str();
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub(crate) fn category_color(category: Category) -> &'static str {
    match category {
        Category::Food => "#FF6B6B",
        Category::Transport => "#4ECDC4",
        Category::Bills => "#FFD166",
        Category::Shopping => "#F78FB3",
        Category::Entertainment => "#6A0572",
        Category::Health => "#1FDA9A",
        Category::Education => "#4A90E2",
        Category::Salary => "#2ECC71",
        Category::Business => "#3498DB",
        Category::Investment => "#9B59B6",
        Category::Gift => "#F1C40F",
        Category::Other => "#7F8C8D",
    }
}

/// Color for a raw category key; unknown keys get the `other` color.
pub(crate) fn category_color_for_key(key: &str) -> &'static str {
    category_color(Category::parse(key).unwrap_or(Category::Other))
}
