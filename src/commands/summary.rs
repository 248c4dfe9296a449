use crate::args::GoalArgs;
use crate::commands::{load, Out};
use crate::model::{Amount, Transaction};
use crate::report::{GoalEvaluation, Totals};
use crate::{Config, Result};
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals, savings and the savings goal evaluation for a set of transactions.
#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub totals: Totals,
    pub savings_amount: Amount,
    pub savings_percentage: Decimal,
    pub goal: u8,
    pub evaluation: GoalEvaluation,
}

impl Summary {
    pub fn new(transactions: &[Transaction], goal: u8) -> Result<Self> {
        let totals = Totals::new(transactions)?;
        Ok(Self {
            totals,
            savings_amount: totals.savings_amount(),
            savings_percentage: totals.savings_percentage(),
            goal,
            evaluation: GoalEvaluation::new(&totals, goal),
        })
    }

    pub(super) fn render(&self) -> String {
        let t = &self.totals;
        let lines = [
            format!("Total Income:     {}", t.total_income().to_currency_string()),
            format!("Total Expenses:   {}", t.total_expense().to_currency_string()),
            format!("Total Investment: {}", t.total_investment().to_currency_string()),
            format!("Net Balance:      {}", t.net_balance().to_currency_string()),
            format!("Savings:          {}", self.savings_amount.to_currency_string()),
            format!("Savings %:        {:.2}%", self.savings_percentage),
            format!("Savings goal:     {}%", self.goal),
            self.evaluation.to_string(),
        ];
        lines.join("\n")
    }
}

/// Loads all transactions and computes their totals, savings and goal evaluation. The goal in
/// `args` takes precedence over the configured one.
pub async fn summary(config: Config, args: GoalArgs) -> Result<Out<Summary>> {
    let transactions = load(&config)?;
    let goal = args.goal().unwrap_or_else(|| config.savings_goal());
    let summary = Summary::new(transactions.data(), goal)?;
    Ok(Out::new(summary.render(), summary))
}
