use crate::model::{Amount, Kind, Transaction};
use crate::Result;
use anyhow::ensure;
use chrono::NaiveDate;

/// A transaction as submitted by the user, before it has been validated.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Entry {
    pub kind: Kind,
    pub date: NaiveDate,
    pub amount: Amount,
    pub category: String,
    pub note: Option<String>,
}

impl Entry {
    /// Checks the entry and turns it into a `Transaction`. The category and note are trimmed.
    ///
    /// # Errors
    /// - The amount is zero or negative.
    /// - The category is empty or only whitespace.
    pub fn validate(self) -> Result<Transaction> {
        ensure!(
            self.amount.is_positive(),
            "Amount must be greater than zero, got {}",
            self.amount
        );
        let category = self.category.trim();
        ensure!(!category.is_empty(), "Category must not be blank");
        let note = self.note.as_deref().map(str::trim).unwrap_or_default();

        Ok(Transaction::new(
            self.date.format("%Y-%m-%d").to_string(),
            self.kind,
            self.amount,
            category,
            note,
        ))
    }
}
