use crate::args::GoalArgs;
use crate::commands::list::{newest_first, no_transactions_message, render_table};
use crate::commands::{analyze, insights, load, plural, Out, Summary};
use crate::model::Transaction;
use crate::report::{Analysis, Insights, Trend, DEFAULT_LETTER};
use crate::{Config, Result};
use serde::Serialize;

/// Everything the dashboard shows, computed from a single load of the transactions file.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub summary: Summary,
    pub insights: Insights,
    /// Income, expenses and investments per day.
    pub trend: Trend,
    pub analysis: Analysis,
    /// Newest first.
    pub transactions: Vec<Transaction>,
    /// Rows of the transactions file that could not be parsed.
    pub skipped: usize,
}

/// Loads all transactions once and renders the overview, goal evaluation, insights, amounts over
/// time, the transaction table and the category analysis. When there are no transactions, only a
/// hint to add one is returned.
pub async fn dashboard(config: Config, args: GoalArgs) -> Result<Out<Dashboard>> {
    let loaded = load(&config)?;
    if loaded.is_empty() {
        return Ok(Out::new_message(no_transactions_message()));
    }
    let skipped = loaded.skipped();
    let data = loaded.into_data();

    let goal = args.goal().unwrap_or_else(|| config.savings_goal());
    let dashboard = Dashboard {
        summary: Summary::new(&data, goal)?,
        insights: Insights::new(&data)?,
        trend: Trend::new(&data)?,
        analysis: analyze::analyze_categories(&data, DEFAULT_LETTER),
        transactions: newest_first(data),
        skipped,
    };
    Ok(Out::new(dashboard.render(), dashboard))
}

impl Dashboard {
    fn render(&self) -> String {
        let mut sections = vec![
            section("Financial Overview", self.summary.render()),
            section("Analytics & Insights", insights::render(&self.insights)),
            section("Income vs Expense Over Time", render_trend(&self.trend)),
            section("All Transactions", render_table(&self.transactions)),
            section("String Analysis (Categories)", analyze::render(&self.analysis)),
        ];
        if self.skipped > 0 {
            sections.push(format!(
                "Skipped {} malformed row{} in the transactions file.",
                self.skipped,
                plural(self.skipped)
            ));
        }
        sections.join("\n\n")
    }
}

fn section(title: &str, body: String) -> String {
    format!("== {title} ==\n{body}")
}

/// One line per day, oldest first, with the income, expense and investment totals of that day.
fn render_trend(trend: &Trend) -> String {
    let mut lines = Vec::new();
    if trend.is_empty() {
        lines.push(String::from("No dated transactions to show."));
    } else {
        let rows: Vec<[String; 4]> = trend
            .points()
            .iter()
            .map(|p| {
                [
                    p.date.to_string(),
                    p.income.to_currency_string(),
                    p.expense.to_currency_string(),
                    p.investment.to_currency_string(),
                ]
            })
            .collect();
        let header = ["Date", "Income", "Expense", "Investment"].map(String::from);
        let mut widths = [0usize; 4];
        for row in std::iter::once(&header).chain(rows.iter()) {
            for (w, cell) in widths.iter_mut().zip(row.iter()) {
                *w = (*w).max(cell.chars().count());
            }
        }
        for row in std::iter::once(&header).chain(rows.iter()) {
            lines.push(format!(
                "{:<w0$}  {:>w1$}  {:>w2$}  {:>w3$}",
                row[0],
                row[1],
                row[2],
                row[3],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
                w3 = widths[3],
            ));
        }
    }
    let undated = trend.undated();
    if undated > 0 {
        lines.push(format!(
            "{} transaction{} without a valid date not shown.",
            undated,
            plural(undated)
        ));
    }
    lines.join("\n")
}
