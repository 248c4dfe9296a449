//! Types that represent the core data model, such as `Transaction` and `Amount`.
mod amount;
mod entry;
mod kind;
mod transaction;

pub use amount::{Amount, AmountError};
pub use entry::Entry;
pub use kind::Kind;
pub use transaction::{Transaction, TransactionColumn, Transactions, HEADERS};
