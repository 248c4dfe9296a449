use crate::model::{Amount, Kind, Transaction};
use crate::Result;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Displayed in place of a category when there is none to show.
pub const NOT_AVAILABLE: &str = "N/A";

/// The summed amount of one category.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CategoryAmount {
    pub category: String,
    pub amount: Amount,
}

/// Category based statistics over a set of transactions.
///
/// When categories tie for the largest total or the highest count, the category that appears
/// first in the transactions wins.
#[derive(Default, Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Insights {
    unique_categories: BTreeSet<String>,
    category_totals: BTreeMap<String, Amount>,
    spending_by_category: Vec<CategoryAmount>,
    highest_spending_category: Option<String>,
    most_frequent_category: Option<String>,
}

impl Insights {
    /// # Errors
    /// - Returns an error if the total of a category does not fit in a `Decimal`.
    pub fn new(transactions: &[Transaction]) -> Result<Self> {
        let mut totals: Tally<Amount> = Tally::default();
        let mut expenses: Tally<Amount> = Tally::default();
        let mut counts: Tally<usize> = Tally::default();

        for t in transactions {
            totals.add(t.category(), t.amount())?;
            counts.add(t.category(), 1)?;
            if t.kind() == Kind::Expense {
                expenses.add(t.category(), t.amount())?;
            }
        }

        let highest_spending_category = expenses.max().map(String::from);
        let most_frequent_category = counts.max().map(String::from);

        let mut spending_by_category: Vec<CategoryAmount> = expenses
            .entries
            .into_iter()
            .map(|(category, amount)| CategoryAmount { category, amount })
            .collect();
        // Stable, so equal amounts stay in first-seen order.
        spending_by_category.sort_by(|a, b| b.amount.cmp(&a.amount));

        Ok(Self {
            unique_categories: totals.entries.iter().map(|(c, _)| c.clone()).collect(),
            category_totals: totals.entries.into_iter().collect(),
            spending_by_category,
            highest_spending_category,
            most_frequent_category,
        })
    }

    /// The distinct category labels, sorted.
    pub fn unique_categories(&self) -> &BTreeSet<String> {
        &self.unique_categories
    }

    /// The summed amount per category across all kinds of transactions.
    pub fn category_totals(&self) -> &BTreeMap<String, Amount> {
        &self.category_totals
    }

    /// The summed amount per category of expense transactions only, largest first.
    pub fn spending_by_category(&self) -> &[CategoryAmount] {
        &self.spending_by_category
    }

    /// The category with the largest expense total, or `N/A` when there are no expenses.
    pub fn highest_spending_category(&self) -> &str {
        self.highest_spending_category
            .as_deref()
            .unwrap_or(NOT_AVAILABLE)
    }

    /// The category used by the most transactions, or `N/A` when there are no transactions.
    pub fn most_frequent_category(&self) -> &str {
        self.most_frequent_category
            .as_deref()
            .unwrap_or(NOT_AVAILABLE)
    }
}

/// Accumulates a value per category, remembering the order in which categories were first seen.
#[derive(Default)]
struct Tally<V> {
    entries: Vec<(String, V)>,
    index: HashMap<String, usize>,
}

/// A value that can be summed without panicking on overflow.
trait Accumulate: Sized {
    fn accumulate(self, rhs: Self) -> Option<Self>;
}

impl Accumulate for Amount {
    fn accumulate(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
}

impl Accumulate for usize {
    fn accumulate(self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
}

impl<V> Tally<V>
where
    V: Default + Copy + Accumulate + PartialOrd,
{
    fn add(&mut self, category: &str, value: V) -> Result<()> {
        let ix = match self.index.get(category) {
            Some(ix) => *ix,
            None => {
                self.entries.push((category.to_string(), V::default()));
                let ix = self.entries.len() - 1;
                self.index.insert(category.to_string(), ix);
                ix
            }
        };
        let entry = &mut self.entries[ix].1;
        *entry = entry
            .accumulate(value)
            .with_context(|| format!("The total for category '{category}' is too large"))?;
        Ok(())
    }

    /// The first-seen category holding the largest value.
    fn max(&self) -> Option<&str> {
        let mut best: Option<&(String, V)> = None;
        for entry in &self.entries {
            match best {
                Some(b) if entry.1 <= b.1 => {}
                _ => best = Some(entry),
            }
        }
        best.map(|(category, _)| category.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn t(kind: Kind, amount: &str, category: &str) -> Transaction {
        Transaction::new("2023-10-01", kind, Amount::from_str(amount).unwrap(), category, "")
    }

    fn amount(s: &str) -> Amount {
        Amount::from_str(s).unwrap()
    }

    #[test]
    fn test_insights() {
        let insights = Insights::new(&[
            t(Kind::Expense, "100.0", "Food"),
            t(Kind::Expense, "50.0", "Transport"),
            t(Kind::Expense, "200.0", "Food"),
        ])
        .unwrap();
        assert_eq!(insights.highest_spending_category(), "Food");
        assert_eq!(insights.most_frequent_category(), "Food");
        assert_eq!(insights.unique_categories().len(), 2);
        assert_eq!(insights.category_totals()["Food"], amount("300"));
        assert_eq!(insights.category_totals()["Transport"], amount("50"));
    }

    #[test]
    fn test_insights_empty() {
        let insights = Insights::new(&[]).unwrap();
        assert_eq!(insights.highest_spending_category(), NOT_AVAILABLE);
        assert_eq!(insights.most_frequent_category(), NOT_AVAILABLE);
        assert!(insights.unique_categories().is_empty());
        assert!(insights.category_totals().is_empty());
        assert!(insights.spending_by_category().is_empty());
    }

    #[test]
    fn test_highest_spending_ignores_other_kinds() {
        let insights = Insights::new(&[
            t(Kind::Income, "5000", "Salary"),
            t(Kind::Investment, "1000", "Stocks"),
            t(Kind::Expense, "10", "Food"),
        ])
        .unwrap();
        assert_eq!(insights.highest_spending_category(), "Food");
        assert_eq!(insights.category_totals()["Salary"], amount("5000"));
    }

    #[test]
    fn test_no_expenses() {
        let insights = Insights::new(&[t(Kind::Income, "5000", "Salary")]).unwrap();
        assert_eq!(insights.highest_spending_category(), NOT_AVAILABLE);
        assert_eq!(insights.most_frequent_category(), "Salary");
    }

    #[test]
    fn test_ties_go_to_first_seen() {
        let insights = Insights::new(&[
            t(Kind::Expense, "30", "Transport"),
            t(Kind::Expense, "10", "Food"),
            t(Kind::Expense, "20", "Food"),
            t(Kind::Expense, "30", "Rent"),
        ])
        .unwrap();
        // Transport, Food and Rent all total 30.
        assert_eq!(insights.highest_spending_category(), "Transport");
        // Food is the only category used twice.
        assert_eq!(insights.most_frequent_category(), "Food");

        let insights = Insights::new(&[
            t(Kind::Income, "1", "Salary"),
            t(Kind::Expense, "1", "Food"),
        ])
        .unwrap();
        assert_eq!(insights.most_frequent_category(), "Salary");
    }

    #[test]
    fn test_spending_by_category_sorted() {
        let insights = Insights::new(&[
            t(Kind::Expense, "5", "Coffee"),
            t(Kind::Income, "900", "Salary"),
            t(Kind::Expense, "40", "Rent"),
            t(Kind::Expense, "5", "Snacks"),
            t(Kind::Expense, "10", "Coffee"),
        ])
        .unwrap();
        let spending: Vec<(&str, Decimal)> = insights
            .spending_by_category()
            .iter()
            .map(|c| (c.category.as_str(), c.amount.value()))
            .collect();
        assert_eq!(
            spending,
            vec![
                ("Rent", Decimal::from(40)),
                ("Coffee", Decimal::from(15)),
                ("Snacks", Decimal::from(5)),
            ]
        );
    }

    #[test]
    fn test_category_total_overflow_is_error() {
        let err = Insights::new(&[
            t(Kind::Expense, "5e28", "Rent"),
            t(Kind::Expense, "5e28", "Rent"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("'Rent' is too large"));

        let insights = Insights::new(&[
            t(Kind::Expense, "5e28", "Rent"),
            t(Kind::Expense, "5e28", "Food"),
        ])
        .unwrap();
        assert_eq!(insights.highest_spending_category(), "Rent");
    }
}
