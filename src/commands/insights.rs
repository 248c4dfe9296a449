use crate::commands::{load, Out};
use crate::report::Insights;
use crate::{Config, Result};

/// Loads all transactions and computes category insights.
pub async fn insights(config: Config) -> Result<Out<Insights>> {
    let transactions = load(&config)?;
    let insights = Insights::new(transactions.data())?;
    Ok(Out::new(render(&insights), insights))
}

pub(super) fn render(insights: &Insights) -> String {
    let categories = insights.unique_categories();
    let mut lines = vec![
        format!(
            "Highest spending category: {}",
            insights.highest_spending_category()
        ),
        format!(
            "Most frequent category: {}",
            insights.most_frequent_category()
        ),
        format!(
            "Unique categories ({}): {}",
            categories.len(),
            categories
                .iter()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        ),
    ];

    let spending = insights.spending_by_category();
    if spending.is_empty() {
        lines.push(String::from("No expense data to show."));
    } else {
        lines.push(String::from("Spending by category:"));
        let width = spending
            .iter()
            .map(|c| c.category.chars().count())
            .max()
            .unwrap_or_default();
        for c in spending {
            lines.push(format!(
                "  {:<width$}  {}",
                c.category,
                c.amount.to_currency_string()
            ));
        }
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::NOT_AVAILABLE;
    use crate::test::TestEnv;

    #[tokio::test]
    async fn test_insights() {
        let env = TestEnv::new().await;
        env.insert_sample_transactions();
        let out = insights(env.config()).await.unwrap();
        let i = out.structure().unwrap();
        assert_eq!(i.highest_spending_category(), "Rent");
        assert_eq!(i.unique_categories().len(), 3);
        assert!(out
            .message()
            .contains("Unique categories (3): Rent, Salary, Stocks"));
        assert!(out.message().contains("  Rent  $2,000.00"));
    }

    #[tokio::test]
    async fn test_insights_empty() {
        let env = TestEnv::new().await;
        let out = insights(env.config()).await.unwrap();
        let i = out.structure().unwrap();
        assert_eq!(i.highest_spending_category(), NOT_AVAILABLE);
        assert_eq!(i.most_frequent_category(), NOT_AVAILABLE);
        assert!(out.message().contains("No expense data to show."));
    }
}
