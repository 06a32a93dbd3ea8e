use serde::{Deserialize, Serialize};

use super::TransactionType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Category {
    Food,
    Transport,
    Bills,
    Shopping,
    Entertainment,
    Health,
    Education,
    Salary,
    Business,
    Investment,
    Gift,
    Other,
}

impl Category {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Transport => "transport",
            Self::Bills => "bills",
            Self::Shopping => "shopping",
            Self::Entertainment => "entertainment",
            Self::Health => "health",
            Self::Education => "education",
            Self::Salary => "salary",
            Self::Business => "business",
            Self::Investment => "investment",
            Self::Gift => "gift",
            Self::Other => "other",
        }
    }

    /// Case-insensitive lookup of a category key. Unknown keys yield `None`.
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "food" => Some(Self::Food),
            "transport" => Some(Self::Transport),
            "bills" => Some(Self::Bills),
            "shopping" => Some(Self::Shopping),
            "entertainment" => Some(Self::Entertainment),
            "health" => Some(Self::Health),
            "education" => Some(Self::Education),
            "salary" => Some(Self::Salary),
            "business" => Some(Self::Business),
            "investment" => Some(Self::Investment),
            "gift" => Some(Self::Gift),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub(crate) fn expense_categories() -> &'static [Category] {
        &[
            Self::Food,
            Self::Transport,
            Self::Bills,
            Self::Shopping,
            Self::Entertainment,
            Self::Health,
            Self::Education,
            Self::Other,
        ]
    }

    pub(crate) fn income_categories() -> &'static [Category] {
        &[
            Self::Salary,
            Self::Business,
            Self::Investment,
            Self::Gift,
            Self::Other,
        ]
    }

    pub(crate) fn for_type(kind: TransactionType) -> &'static [Category] {
        match kind {
            TransactionType::Expense => Self::expense_categories(),
            TransactionType::Income => Self::income_categories(),
        }
    }

    /// Whether this category may be used for a transaction of `kind`.
    /// `Other` is valid for both.
    pub(crate) fn allows(&self, kind: TransactionType) -> bool {
        Self::for_type(kind).contains(self)
    }

    /// Category preselected when a new transaction of `kind` is entered.
    pub(crate) fn default_for(kind: TransactionType) -> Self {
        match kind {
            TransactionType::Expense => Self::Food,
            TransactionType::Income => Self::Salary,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
