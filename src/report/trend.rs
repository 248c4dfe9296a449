use crate::model::{Amount, Kind, Transaction};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The summed amounts of each kind of transaction on one day.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub income: Amount,
    pub expense: Amount,
    pub investment: Amount,
}

impl TrendPoint {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            income: Amount::ZERO,
            expense: Amount::ZERO,
            investment: Amount::ZERO,
        }
    }

    fn amount_mut(&mut self, kind: Kind) -> &mut Amount {
        match kind {
            Kind::Income => &mut self.income,
            Kind::Expense => &mut self.expense,
            Kind::Investment => &mut self.investment,
        }
    }
}

/// Income, expenses and investments over time, one point per day that has transactions.
///
/// Transactions whose date cannot be parsed have no place on the time axis. They are left out
/// and counted in `undated`.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Trend {
    points: Vec<TrendPoint>,
    undated: usize,
}

impl Trend {
    /// # Errors
    /// - Returns an error if the total of a day does not fit in a `Decimal`.
    pub fn new(transactions: &[Transaction]) -> Result<Self> {
        let mut days: BTreeMap<NaiveDate, TrendPoint> = BTreeMap::new();
        let mut undated = 0;
        for t in transactions {
            let Some(date) = t.parsed_date() else {
                undated += 1;
                continue;
            };
            let amount = days
                .entry(date)
                .or_insert_with(|| TrendPoint::new(date))
                .amount_mut(t.kind());
            *amount = amount
                .checked_add(t.amount())
                .with_context(|| format!("The {} total for {date} is too large", t.kind()))?;
        }
        Ok(Self {
            points: days.into_values().collect(),
            undated,
        })
    }

    /// One point per day, oldest first.
    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    /// The number of transactions left out because their date could not be parsed.
    pub fn undated(&self) -> usize {
        self.undated
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
