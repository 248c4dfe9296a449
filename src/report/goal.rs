use crate::report::Totals;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// How many percentage points above the goal counts as excellent.
const EXCELLENT_MARGIN: Decimal = Decimal::TEN;

/// The outcome of comparing the savings percentage against a savings goal.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum GoalEvaluation {
    /// There is no income, so there is nothing to evaluate.
    NoIncome,
    /// At least ten points above the goal.
    Excellent { surplus: Decimal },
    /// At or above the goal.
    Met { surplus: Decimal },
    /// Below the goal but within three quarters of it.
    Close { actual: Decimal, goal: u8 },
    Below { actual: Decimal, goal: u8 },
}

impl GoalEvaluation {
    /// Compares the savings percentage of `totals` against `goal` percent.
    pub fn new(totals: &Totals, goal: u8) -> Self {
        if !totals.total_income().is_positive() {
            return GoalEvaluation::NoIncome;
        }
        let actual = totals.savings_percentage();
        let target = Decimal::from(goal);
        if actual >= target + EXCELLENT_MARGIN {
            GoalEvaluation::Excellent {
                surplus: actual - target,
            }
        } else if actual >= target {
            GoalEvaluation::Met {
                surplus: actual - target,
            }
        } else if actual >= target * close_fraction() {
            GoalEvaluation::Close { actual, goal }
        } else {
            GoalEvaluation::Below { actual, goal }
        }
    }

    /// True when the goal was met or surpassed.
    pub fn is_met(&self) -> bool {
        matches!(
            self,
            GoalEvaluation::Excellent { .. } | GoalEvaluation::Met { .. }
        )
    }
}

/// How close to the goal, as a fraction of it, still counts as close.
fn close_fraction() -> Decimal {
    Decimal::new(75, 2)
}

impl Display for GoalEvaluation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GoalEvaluation::NoIncome => {
                write!(f, "No income recorded yet, cannot evaluate savings goal.")
            }
            GoalEvaluation::Excellent { surplus } => write!(
                f,
                "Excellent! You're surpassing your goal by {surplus:.2} percentage points!"
            ),
            GoalEvaluation::Met { surplus } => write!(
                f,
                "Good, you've met your goal (by {surplus:.2} percentage points). Keep it up."
            ),
            GoalEvaluation::Close { actual, goal } => write!(
                f,
                "Close, you're at {actual:.2}% which is slightly below your {goal}% goal. Try \
                trimming expenses."
            ),
            GoalEvaluation::Below { actual, goal } => write!(
                f,
                "Below goal, you're at {actual:.2}% vs target {goal}%. Consider boosting income \
                or cutting expenses."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Kind, Transaction};
    use std::str::FromStr;

    fn totals(income: &str, expense: &str) -> Totals {
        Totals::new(&[
            Transaction::new(
                "2023-10-01",
                Kind::Income,
                Amount::from_str(income).unwrap(),
                "Salary",
                "",
            ),
            Transaction::new(
                "2023-10-02",
                Kind::Expense,
                Amount::from_str(expense).unwrap(),
                "Rent",
                "",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_no_income() {
        let totals = Totals::new(&[]).unwrap();
        assert_eq!(GoalEvaluation::new(&totals, 20), GoalEvaluation::NoIncome);
    }

    #[test]
    fn test_excellent() {
        // 60% savings against a 20% goal
        let eval = GoalEvaluation::new(&totals("5000", "2000"), 20);
        assert_eq!(
            eval,
            GoalEvaluation::Excellent {
                surplus: Decimal::from(40)
            }
        );
        assert!(eval.is_met());
        assert!(eval.to_string().contains("40.00 percentage points"));
    }

    #[test]
    fn test_met() {
        // 25% savings against a 20% goal
        let eval = GoalEvaluation::new(&totals("100", "75"), 20);
        assert_eq!(
            eval,
            GoalEvaluation::Met {
                surplus: Decimal::from(5)
            }
        );
        assert!(eval.is_met());
    }

    #[test]
    fn test_met_exactly() {
        let eval = GoalEvaluation::new(&totals("100", "80"), 20);
        assert!(matches!(eval, GoalEvaluation::Met { .. }));
    }

    #[test]
    fn test_close() {
        // 16% savings against a 20% goal, 15% is the lower bound for close
        let eval = GoalEvaluation::new(&totals("100", "84"), 20);
        assert!(matches!(eval, GoalEvaluation::Close { goal: 20, .. }));
        assert!(!eval.is_met());
        assert!(eval.to_string().contains("16.00%"));
    }

    #[test]
    fn test_below() {
        let eval = GoalEvaluation::new(&totals("100", "90"), 20);
        assert!(matches!(eval, GoalEvaluation::Below { goal: 20, .. }));
        assert!(eval.to_string().contains("target 20%"));
    }

    #[test]
    fn test_zero_goal_is_met() {
        let eval = GoalEvaluation::new(&totals("100", "100"), 0);
        assert!(matches!(eval, GoalEvaluation::Met { .. }));
    }
}
