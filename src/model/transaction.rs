use crate::model::{Amount, Kind};
use crate::Result;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// The transactions loaded from the transactions file, in file order, along with the number of
/// rows that were discarded because they could not be parsed.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Transactions {
    data: Vec<Transaction>,
    skipped: usize,
}

impl Transactions {
    /// Parses rows of text where the first row holds the header names. Rows that do not parse are
    /// counted and dropped.
    pub fn parse<S, R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        S: AsRef<str>,
        R: IntoIterator<Item = S>,
    {
        let mut rows = rows.into_iter();
        let headers: Vec<String> = match rows.next() {
            Some(header_row) => header_row
                .into_iter()
                .map(|h| h.as_ref().trim().to_string())
                .collect(),
            None => return Self::default(),
        };

        let mut transactions = Self::default();
        for (row_ix, row) in rows.enumerate() {
            match Transaction::new_with_headers(&headers, row) {
                Ok(t) => transactions.data.push(t),
                Err(e) => {
                    // Row 1 is the header row.
                    debug!("Skipping row {}: {e:#}", row_ix + 2);
                    transactions.skipped += 1;
                }
            }
        }
        transactions
    }

    pub fn data(&self) -> &[Transaction] {
        &self.data
    }

    pub fn into_data(self) -> Vec<Transaction> {
        self.data
    }

    /// The number of rows that were discarded during parsing.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub(crate) fn add_skipped(&mut self, count: usize) {
        self.skipped += count;
    }
}

/// Represents a single row of the transactions file.
///
/// A `Transaction` is never changed after it is created. The `date` is kept as the text that was
/// stored, so a row with an odd date is still loaded; use `parsed_date` when a calendar date is
/// needed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Transaction {
    pub(crate) date: String,
    pub(crate) kind: Kind,
    pub(crate) amount: Amount,
    pub(crate) category: String,
    pub(crate) note: String,
}

impl Transaction {
    pub fn new(
        date: impl Into<String>,
        kind: Kind,
        amount: Amount,
        category: impl Into<String>,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            kind,
            amount,
            category: category.into(),
            note: note.into(),
        }
    }

    /// Parses a row given the header names of the file. Each value is trimmed.
    ///
    /// Values without a header and headers that are not recognized are ignored. When a header
    /// appears more than once, the last value wins.
    ///
    /// # Errors
    /// - The `Type` value is not exactly `Income`, `Expense` or `Investment`.
    /// - The `Amount` value cannot be parsed. When there is no `Amount` header at all, the amount
    ///   is zero.
    pub fn new_with_headers<S1, S2, I>(headers: &[S1], values: I) -> Result<Self>
    where
        S1: AsRef<str>,
        S2: AsRef<str>,
        I: IntoIterator<Item = S2>,
    {
        let mut date = String::new();
        let mut kind = String::new();
        let mut amount: Option<String> = None;
        let mut category = String::new();
        let mut note = String::new();

        for (ix, value) in values.into_iter().enumerate() {
            let Some(header) = headers.get(ix) else {
                continue;
            };
            let value = value.as_ref().trim().to_string();
            match TransactionColumn::from_header(header.as_ref().trim()) {
                Ok(TransactionColumn::Date) => date = value,
                Ok(TransactionColumn::Type) => kind = value,
                Ok(TransactionColumn::Amount) => amount = Some(value),
                Ok(TransactionColumn::Category) => category = value,
                Ok(TransactionColumn::Note) => note = value,
                Err(_) => {}
            }
        }

        let has_amount_header = headers
            .iter()
            .any(|h| h.as_ref().trim() == AMOUNT_STR);
        let amount = match amount {
            Some(a) => a,
            None if has_amount_header => String::new(),
            None => String::from("0"),
        };

        let kind = Kind::from_str(&kind)
            .with_context(|| format!("Unrecognized transaction type '{kind}'"))?;
        let amount = Amount::from_str(&amount)?;

        Ok(Self {
            date,
            kind,
            amount,
            category,
            note,
        })
    }

    /// The values of this transaction in the order of `HEADERS`.
    pub fn to_row(&self) -> [String; 5] {
        [
            self.date.clone(),
            self.kind.to_string(),
            self.amount.to_string(),
            self.category.clone(),
            self.note.clone(),
        ]
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    /// The date parsed as an ISO-8601 calendar date, if it is one.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn note(&self) -> &str {
        &self.note
    }
}

/// Represents the known columns of the transactions file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum TransactionColumn {
    Date,
    Type,
    Amount,
    Category,
    Note,
}

impl TransactionColumn {
    pub fn from_header(header: impl AsRef<str>) -> Result<TransactionColumn> {
        match header.as_ref() {
            DATE_STR => Ok(TransactionColumn::Date),
            TYPE_STR => Ok(TransactionColumn::Type),
            AMOUNT_STR => Ok(TransactionColumn::Amount),
            CATEGORY_STR => Ok(TransactionColumn::Category),
            NOTE_STR => Ok(TransactionColumn::Note),
            bad => bail!("Invalid transaction column name '{bad}'"),
        }
    }

    pub fn as_header_str(&self) -> &'static str {
        match self {
            TransactionColumn::Date => DATE_STR,
            TransactionColumn::Type => TYPE_STR,
            TransactionColumn::Amount => AMOUNT_STR,
            TransactionColumn::Category => CATEGORY_STR,
            TransactionColumn::Note => NOTE_STR,
        }
    }
}

pub(crate) const DATE_STR: &str = "Date";
pub(crate) const TYPE_STR: &str = "Type";
pub(crate) const AMOUNT_STR: &str = "Amount";
pub(crate) const CATEGORY_STR: &str = "Category";
pub(crate) const NOTE_STR: &str = "Note";

/// The header row of the transactions file, in column order.
pub const HEADERS: [&str; 5] = [DATE_STR, TYPE_STR, AMOUNT_STR, CATEGORY_STR, NOTE_STR];
