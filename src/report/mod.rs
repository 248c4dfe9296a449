//! Aggregations over a set of transactions: totals, savings goal evaluation, category insights,
//! amounts over time and text analysis of category labels.
mod goal;
mod insights;
mod text;
mod totals;
mod trend;

pub use goal::GoalEvaluation;
pub use insights::{CategoryAmount, Insights, NOT_AVAILABLE};
pub use text::{analyze, analyze_letter, Analysis, DEFAULT_LETTER, SEPARATOR};
pub use totals::Totals;
pub use trend::{Trend, TrendPoint};
