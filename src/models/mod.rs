mod category;
mod transaction;

pub(crate) use category::Category;
pub(crate) use transaction::{Transaction, TransactionType};

#[cfg(test)]
mod tests;
