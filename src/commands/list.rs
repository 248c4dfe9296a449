use crate::commands::{load, plural, Out};
use crate::model::Transaction;
use crate::{Config, Result};
use std::cmp::Reverse;

/// Loads all transactions and returns them newest first.
///
/// Transactions on the same date keep their file order. Transactions whose date cannot be parsed
/// are listed last.
pub async fn list(config: Config) -> Result<Out<Vec<Transaction>>> {
    let transactions = newest_first(load(&config)?.into_data());
    if transactions.is_empty() {
        return Ok(Out::new(no_transactions_message(), transactions));
    }
    let count = transactions.len();
    let message = format!(
        "{} transaction{}\n{}",
        count,
        plural(count),
        render_table(&transactions)
    );
    Ok(Out::new(message, transactions))
}

pub(super) fn no_transactions_message() -> &'static str {
    "No transactions found, add your first transaction with 'fin add'"
}

/// Sorts by date descending. The sort is stable and `None` sorts below every date.
pub(super) fn newest_first(mut transactions: Vec<Transaction>) -> Vec<Transaction> {
    transactions.sort_by_key(|t| Reverse(t.parsed_date()));
    transactions
}

/// Renders `transactions` as aligned text columns: date, type, category, amount and note.
pub(super) fn render_table(transactions: &[Transaction]) -> String {
    let rows: Vec<[String; 5]> = transactions
        .iter()
        .map(|t| {
            [
                t.date().to_string(),
                t.kind().to_string(),
                t.category().to_string(),
                t.amount().to_currency_string(),
                t.note().to_string(),
            ]
        })
        .collect();
    let header = ["Date", "Type", "Category", "Amount", "Note"].map(String::from);

    let mut widths = [0usize; 5];
    for row in std::iter::once(&header).chain(rows.iter()) {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            format!(
                "{:<w0$}  {:<w1$}  {:<w2$}  {:>w3$}  {}",
                row[0],
                row[1],
                row[2],
                row[3],
                row[4],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2],
                w3 = widths[3],
            )
            .trim_end()
            .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n")
}
