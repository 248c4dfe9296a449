use crate::model::{Amount, Kind, Transaction};
use crate::Result;
use anyhow::Context;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Running totals per transaction kind, the resulting net balance and savings.
#[derive(Default, Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Totals {
    total_income: Amount,
    total_expense: Amount,
    total_investment: Amount,
    net_balance: Amount,
    savings_amount: Amount,
    savings_percentage: Decimal,
}

impl Totals {
    /// Sums `transactions` by kind. Expenses and investments both reduce the net balance.
    ///
    /// # Errors
    /// - Returns an error if a total does not fit in a `Decimal`.
    pub fn new(transactions: &[Transaction]) -> Result<Self> {
        let mut totals = Self::default();
        for t in transactions {
            let total = match t.kind() {
                Kind::Income => &mut totals.total_income,
                Kind::Expense => &mut totals.total_expense,
                Kind::Investment => &mut totals.total_investment,
            };
            *total = total.checked_add(t.amount()).with_context(|| {
                format!(
                    "The {} total is too large after adding {} for '{}' on {}",
                    t.kind(),
                    t.amount(),
                    t.category(),
                    t.date()
                )
            })?;
        }

        totals.net_balance = totals
            .total_income
            .checked_sub(totals.total_expense)
            .and_then(|b| b.checked_sub(totals.total_investment))
            .context("The net balance is too large to compute")?;

        let savings = totals
            .total_income
            .checked_sub(totals.total_expense)
            .context("The savings amount is too large to compute")?;
        if savings.is_positive() {
            totals.savings_amount = savings;
        }

        if totals.total_income.is_positive() {
            // Divide first so that a large income cannot overflow the multiplication.
            totals.savings_percentage = totals
                .savings_amount
                .value()
                .checked_div(totals.total_income.value())
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .context("The savings percentage is too large to compute")?;
        }
        Ok(totals)
    }

    pub fn total_income(&self) -> Amount {
        self.total_income
    }

    pub fn total_expense(&self) -> Amount {
        self.total_expense
    }

    pub fn total_investment(&self) -> Amount {
        self.total_investment
    }

    pub fn net_balance(&self) -> Amount {
        self.net_balance
    }

    /// Income not consumed by expenses, never below zero. Investments are not subtracted.
    pub fn savings_amount(&self) -> Amount {
        self.savings_amount
    }

    /// `savings_amount` as a percentage of income, or zero when there is no income.
    pub fn savings_percentage(&self) -> Decimal {
        self.savings_percentage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn t(kind: Kind, amount: &str, category: &str) -> Transaction {
        Transaction::new("2023-10-01", kind, Amount::from_str(amount).unwrap(), category, "")
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_totals() {
        let totals = Totals::new(&[
            t(Kind::Income, "5000.0", "Salary"),
            t(Kind::Expense, "2000.0", "Rent"),
            t(Kind::Investment, "1000.0", "Stocks"),
        ])
        .unwrap();
        assert_eq!(totals.total_income().value(), dec("5000"));
        assert_eq!(totals.total_expense().value(), dec("2000"));
        assert_eq!(totals.total_investment().value(), dec("1000"));
        assert_eq!(totals.net_balance().value(), dec("2000"));
        assert_eq!(totals.savings_amount().value(), dec("3000"));
        assert_eq!(totals.savings_percentage(), dec("60"));
    }

    #[test]
    fn test_totals_empty() {
        let totals = Totals::new(&[]).unwrap();
        assert!(totals.total_income().is_zero());
        assert!(totals.total_expense().is_zero());
        assert!(totals.total_investment().is_zero());
        assert!(totals.net_balance().is_zero());
        assert!(totals.savings_amount().is_zero());
        assert_eq!(totals.savings_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_savings_never_negative() {
        let totals = Totals::new(&[
            t(Kind::Income, "100", "Salary"),
            t(Kind::Expense, "250", "Rent"),
        ])
        .unwrap();
        assert_eq!(totals.net_balance().value(), dec("-150"));
        assert!(totals.savings_amount().is_zero());
        assert_eq!(totals.savings_percentage(), Decimal::ZERO);
    }

    #[test]
    fn test_savings_percentage_without_income() {
        let totals = Totals::new(&[t(Kind::Expense, "20", "Food")]).unwrap();
        assert_eq!(totals.savings_percentage(), Decimal::ZERO);
        assert_eq!(totals.net_balance().value(), dec("-20"));
    }

    #[test]
    fn test_totals_sum_repeated_kinds() {
        let totals = Totals::new(&[
            t(Kind::Income, "0.10", "Salary"),
            t(Kind::Income, "0.20", "Bonus"),
        ])
        .unwrap();
        assert_eq!(totals.total_income().value(), dec("0.30"));
    }

    #[test]
    fn test_totals_overflow_is_error() {
        let err = Totals::new(&[
            t(Kind::Income, "5e28", "Salary"),
            t(Kind::Income, "5e28", "Salary"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("Income total is too large"));
    }

    #[test]
    fn test_net_balance_overflow_is_error() {
        let err = Totals::new(&[
            t(Kind::Expense, "-5e28", "Refund"),
            t(Kind::Investment, "5e28", "Stocks"),
            t(Kind::Income, "5e28", "Salary"),
        ])
        .unwrap_err();
        assert!(err.to_string().contains("net balance"));
    }

    #[test]
    fn test_savings_percentage_large_income() {
        let totals = Totals::new(&[t(Kind::Income, "1e27", "Salary")]).unwrap();
        assert_eq!(totals.savings_percentage(), Decimal::ONE_HUNDRED);

        let totals = Totals::new(&[
            t(Kind::Income, "7e28", "Salary"),
            t(Kind::Expense, "3.5e28", "Rent"),
        ])
        .unwrap();
        assert_eq!(totals.savings_percentage(), dec("50"));
    }
}
