//! The transaction store: owns the ledger and budget, loads them once from a
//! [`Storage`] and writes the whole record back after every mutation.

mod seed;

use chrono::Local;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, Transaction, TransactionType};
use crate::stats::generate_id;
use crate::storage::{Storage, StorageError};

pub(crate) use seed::demo_transactions;

/// Key the ledger record is stored under.
pub(crate) const STORAGE_KEY: &str = "expense-tracker-data";

pub(crate) fn default_budget() -> Decimal {
    Decimal::new(2000, 0)
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("there was a problem loading your saved data: {0}")]
    Read(#[source] StorageError),
    #[error("saved data is malformed: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("there was a problem saving your data: {0}")]
    Write(#[source] StorageError),
    #[error("could not encode data for saving: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("amount must be greater than zero (got {0})")]
    InvalidAmount(Decimal),
    #[error("category '{category}' cannot be used for {kind} transactions")]
    CategoryMismatch {
        category: Category,
        kind: TransactionType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StoreState {
    Loading,
    Ready,
}

/// Where the ledger came from on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoadSource {
    /// A saved record was parsed.
    Restored { transactions: usize },
    /// Nothing was saved yet; demo data was inserted.
    Seeded,
    /// Nothing was saved yet and seeding is disabled.
    Empty,
    /// `load` had already run.
    AlreadyLoaded,
}

/// Outcome of the save that follows a mutation.
#[derive(Debug)]
pub(crate) enum Persistence {
    Saved,
    /// The store was still loading, so nothing was written.
    Deferred,
    /// Nothing changed, so nothing was written.
    Unchanged,
    /// The write failed; the in-memory change stands.
    Failed(StoreError),
}

impl Persistence {
    pub(crate) fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }

    pub(crate) fn error(&self) -> Option<&StoreError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// A mutation that took effect in memory, with the result of persisting it.
#[derive(Debug)]
#[must_use]
pub(crate) struct Committed<T> {
    pub value: T,
    pub persistence: Persistence,
}

#[derive(Debug, Clone)]
pub(crate) struct StoreOptions {
    /// Insert the demo ledger when storage holds no record.
    pub seed_demo_data: bool,
    /// Budget used before one is saved, and after a failed load.
    pub default_budget: Decimal,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
            default_budget: default_budget(),
        }
    }
}

#[derive(Serialize)]
struct SavedRecord<'a> {
    transactions: &'a [Transaction],
    #[serde(with = "rust_decimal::serde::float")]
    budget: Decimal,
}

#[derive(Deserialize)]
struct LoadedRecord {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    budget: Option<Decimal>,
}

pub(crate) struct ExpenseStore<S: Storage> {
    storage: S,
    options: StoreOptions,
    state: StoreState,
    transactions: Vec<Transaction>,
    budget: Decimal,
}

impl<S: Storage> ExpenseStore<S> {
    /// A store in the `Loading` state. Call [`load`](Self::load) before using it;
    /// mutations made earlier are kept in memory but never saved, and `load`
    /// replaces them.
    pub(crate) fn new(storage: S, options: StoreOptions) -> Self {
        let budget = options.default_budget;
        Self {
            storage,
            options,
            state: StoreState::Loading,
            transactions: Vec::new(),
            budget,
        }
    }

    /// Construct and load in one step. A load failure still yields a ready
    /// store (empty ledger, default budget) alongside the error.
    pub(crate) fn open(
        storage: S,
        options: StoreOptions,
    ) -> (Self, Result<Committed<LoadSource>, StoreError>) {
        let mut store = Self::new(storage, options);
        let loaded = store.load();
        (store, loaded)
    }

    /// Read the saved record, or seed the demo ledger when there is none.
    /// Always leaves the store `Ready`. After a successful load the ledger is
    /// written back, so a seeded ledger keeps its ids across sessions. A failed
    /// load writes nothing, leaving the unreadable record in place.
    pub(crate) fn load(&mut self) -> Result<Committed<LoadSource>, StoreError> {
        if self.state == StoreState::Ready {
            tracing::warn!("store already loaded; ignoring repeated load");
            return Ok(Committed {
                value: LoadSource::AlreadyLoaded,
                persistence: Persistence::Unchanged,
            });
        }

        let result = self.read_saved();
        self.state = StoreState::Ready;

        let source = match result {
            Ok(Some(record)) => {
                self.transactions = record.transactions;
                self.budget = record.budget.unwrap_or(self.options.default_budget);
                tracing::info!(
                    transactions = self.transactions.len(),
                    budget = %self.budget,
                    "restored saved ledger"
                );
                LoadSource::Restored {
                    transactions: self.transactions.len(),
                }
            }
            Ok(None) if self.options.seed_demo_data => {
                self.transactions = demo_transactions(Local::now());
                self.budget = self.options.default_budget;
                tracing::info!("no saved ledger; seeded demo data");
                LoadSource::Seeded
            }
            Ok(None) => {
                self.transactions.clear();
                self.budget = self.options.default_budget;
                tracing::info!("no saved ledger; starting empty");
                LoadSource::Empty
            }
            Err(err) => {
                self.transactions.clear();
                self.budget = self.options.default_budget;
                tracing::warn!(error = %err, "failed to load ledger; starting empty");
                return Err(err);
            }
        };

        Ok(Committed {
            value: source,
            persistence: self.persist(),
        })
    }

    fn read_saved(&self) -> Result<Option<LoadedRecord>, StoreError> {
        let Some(raw) = self.storage.get(STORAGE_KEY).map_err(StoreError::Read)? else {
            return Ok(None);
        };
        let record = serde_json::from_str(&raw).map_err(StoreError::Parse)?;
        Ok(Some(record))
    }

    pub(crate) fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub(crate) fn budget(&self) -> Decimal {
        self.budget
    }

    pub(crate) fn is_loading(&self) -> bool {
        self.state == StoreState::Loading
    }

    pub(crate) fn state(&self) -> StoreState {
        self.state
    }

    /// Record a new transaction dated now. Non-positive amounts and categories
    /// outside the type's set are rejected without touching state or storage.
    pub(crate) fn add_transaction(
        &mut self,
        amount: Decimal,
        category: Category,
        kind: TransactionType,
        note: Option<String>,
    ) -> Result<Committed<Transaction>, StoreError> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::InvalidAmount(amount));
        }
        if !category.allows(kind) {
            return Err(StoreError::CategoryMismatch { category, kind });
        }

        let note = note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        let txn = Transaction {
            id: generate_id(),
            amount,
            category,
            date: Local::now(),
            note,
            kind,
        };
        self.transactions.push(txn.clone());
        tracing::debug!(id = %txn.id, %amount, %category, %kind, "added transaction");

        Ok(Committed {
            value: txn,
            persistence: self.persist(),
        })
    }

    /// Remove the first transaction with `id`. Saves even when nothing matched.
    pub(crate) fn delete_transaction(&mut self, id: &str) -> Committed<Option<Transaction>> {
        let removed = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .map(|idx| self.transactions.remove(idx));
        match &removed {
            Some(_) => tracing::debug!(id, "deleted transaction"),
            None => tracing::debug!(id, "delete requested for unknown transaction"),
        }

        Committed {
            value: removed,
            persistence: self.persist(),
        }
    }

    /// Replace the budget and return the previous value.
    pub(crate) fn set_budget(&mut self, amount: Decimal) -> Committed<Decimal> {
        let previous = std::mem::replace(&mut self.budget, amount);
        tracing::debug!(%previous, budget = %amount, "updated budget");

        Committed {
            value: previous,
            persistence: self.persist(),
        }
    }

    fn persist(&mut self) -> Persistence {
        if self.state == StoreState::Loading {
            tracing::debug!("store still loading; save deferred");
            return Persistence::Deferred;
        }

        let record = SavedRecord {
            transactions: &self.transactions,
            budget: self.budget,
        };
        let payload = match serde_json::to_string(&record) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::warn!(error = %err, "failed to encode ledger");
                return Persistence::Failed(StoreError::Encode(err));
            }
        };

        match self.storage.set(STORAGE_KEY, &payload) {
            Ok(()) => Persistence::Saved,
            Err(err) => {
                tracing::warn!(error = %err, "failed to save ledger");
                Persistence::Failed(StoreError::Write(err))
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn storage(&self) -> &S {
        &self.storage
    }
}
