use crate::args::AddArgs;
use crate::commands::Out;
use crate::model::Transaction;
use crate::{Config, Result};
use anyhow::Context;
use chrono::Local;

/// Validates a new transaction and appends it to the transactions file.
///
/// # Arguments
///
/// - `config` - The application configuration which locates the transactions file.
/// - `args` - The transaction to record. When no date is given, today's date is used.
///
/// # Returns
///
/// On success, returns an `Out` containing a confirmation message and the stored `Transaction`.
///
/// # Errors
///
/// - Returns an error if the amount is not greater than zero or the category is blank. Nothing
///   is written in that case.
/// - Returns an error if the transactions file cannot be written.
pub async fn add(config: Config, args: AddArgs) -> Result<Out<Transaction>> {
    let today = Local::now().date_naive();
    let transaction = args
        .entry(today)
        .validate()
        .context("Please provide a positive amount and a category")?;

    config.store().append(&transaction)?;

    let message = format!(
        "Added {} of {} for '{}' on {}",
        transaction.kind(),
        transaction.amount().to_currency_string(),
        transaction.category(),
        transaction.date()
    );
    Ok(Out::new(message, transaction))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, Kind};
    use crate::test::TestEnv;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    fn args(kind: Kind, amount: i64, category: &str) -> AddArgs {
        AddArgs::new(
            kind,
            Amount::new(Decimal::from(amount)),
            category,
            NaiveDate::from_ymd_opt(2023, 10, 1),
            Some(String::from(" monthly ")),
        )
    }

    #[tokio::test]
    async fn test_add() {
        let env = TestEnv::new().await;
        let out = add(env.config(), args(Kind::Income, 5000, " Salary "))
            .await
            .unwrap();
        assert_eq!(out.message(), "Added Income of $5,000.00 for 'Salary' on 2023-10-01");

        let stored = env.config().store().load_all().unwrap();
        assert_eq!(stored.len(), 1);
        let t = &stored.data()[0];
        assert_eq!(t, out.structure().unwrap());
        assert_eq!(t.category(), "Salary");
        assert_eq!(t.note(), "monthly");
    }

    #[tokio::test]
    async fn test_add_rejects_zero_amount() {
        let env = TestEnv::new().await;
        let result = add(env.config(), args(Kind::Expense, 0, "Food")).await;
        assert!(result.is_err());
        assert!(!env.config().data_file().exists());
    }

    #[tokio::test]
    async fn test_add_rejects_blank_category() {
        let env = TestEnv::new().await;
        let err = add(env.config(), args(Kind::Expense, 10, "  "))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Category must not be blank"));
        assert!(!env.config().data_file().exists());
    }

    #[tokio::test]
    async fn test_add_defaults_to_today() {
        let env = TestEnv::new().await;
        let args = AddArgs::new(
            Kind::Expense,
            Amount::new(Decimal::from(3)),
            "Coffee",
            None,
            None,
        );
        let out = add(env.config(), args).await.unwrap();
        let date = out.structure().unwrap().parsed_date();
        assert!(date.is_some());
    }
}
