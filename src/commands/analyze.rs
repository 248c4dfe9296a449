use crate::args::AnalyzeArgs;
use crate::commands::{load, Out};
use crate::model::Transaction;
use crate::report::{self, Analysis, DEFAULT_LETTER};
use crate::{Config, Result};

/// Loads all transactions, joins their category labels in file order and counts a letter.
pub async fn analyze(config: Config, args: AnalyzeArgs) -> Result<Out<Analysis>> {
    let transactions = load(&config)?;
    let analysis = analyze_categories(
        transactions.data(),
        args.letter().unwrap_or(DEFAULT_LETTER),
    );
    Ok(Out::new(render(&analysis), analysis))
}

pub(super) fn analyze_categories(transactions: &[Transaction], letter: char) -> Analysis {
    let categories: Vec<&str> = transactions.iter().map(|t| t.category()).collect();
    report::analyze_letter(&categories, letter)
}

pub(super) fn render(analysis: &Analysis) -> String {
    format!(
        "Joined (UPPERCASE): {}\nCount of letter '{}' in joined string: {}",
        analysis.joined_upper, analysis.letter, analysis.letter_count
    )
}
