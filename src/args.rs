//! These structs provide the CLI interface for the fin CLI.

use crate::model::{Amount, Entry, Kind};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// fin: A command-line tool for tracking personal finances.
///
/// Record income, expenses and investments into a local CSV file, then review your totals, how
/// your savings compare to your savings goal, and which categories your money goes to.
///
/// Start with `fin init`, then add transactions with `fin add` and look at them with
/// `fin dashboard`.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the data directory and initialize the configuration file.
    ///
    /// This is the first command you should run. By default the data directory is $HOME/fin and
    /// transactions are stored in transactions.csv inside of it.
    Init(InitArgs),
    /// Record a new income, expense or investment transaction.
    Add(AddArgs),
    /// Show all transactions, newest first.
    List,
    /// Show totals, net balance, savings and how they compare to your savings goal.
    Summary(GoalArgs),
    /// Show category insights: spending by category, the highest spending category, the most
    /// frequent category and the list of categories.
    Insights,
    /// Join all category labels, uppercase them and count a letter in the result.
    Analyze(AnalyzeArgs),
    /// Show everything: totals, goal evaluation, insights, transactions and category analysis.
    Dashboard(GoalArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where fin data and configuration is held. Defaults to ~/fin
    #[arg(long, env = "FIN_HOME", default_value_t = default_fin_home())]
    fin_home: DisplayPath,
}

impl Common {
    pub fn new(log_level: LevelFilter, fin_home: PathBuf) -> Self {
        Self {
            log_level,
            fin_home: fin_home.into(),
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn fin_home(&self) -> &DisplayPath {
        &self.fin_home
    }
}

/// Args for the `fin init` command.
#[derive(Debug, Parser, Clone)]
pub struct InitArgs {
    /// Where to store transactions. A relative path is resolved against the fin home directory.
    /// Defaults to transactions.csv in the fin home directory.
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// The default savings goal in percent, 0 to 100. Defaults to 20.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    goal: Option<u8>,
}

impl InitArgs {
    pub fn new(data_file: Option<PathBuf>, goal: Option<u8>) -> Self {
        Self { data_file, goal }
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.data_file.as_deref()
    }

    pub fn goal(&self) -> Option<u8> {
        self.goal
    }
}

/// Args for the `fin add` command.
#[derive(Debug, Parser, Clone)]
pub struct AddArgs {
    /// The kind of transaction.
    #[arg(value_enum)]
    kind: Kind,

    /// The amount, which must be greater than zero, e.g. 12.50
    #[arg(long)]
    amount: Amount,

    /// The category, e.g. Salary, Rent or Groceries.
    #[arg(long)]
    category: String,

    /// The date of the transaction as YYYY-MM-DD. Defaults to today.
    #[arg(long)]
    date: Option<NaiveDate>,

    /// An optional note.
    #[arg(long)]
    note: Option<String>,
}

impl AddArgs {
    pub fn new(
        kind: Kind,
        amount: Amount,
        category: impl Into<String>,
        date: Option<NaiveDate>,
        note: Option<String>,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date,
            note,
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn note(&self) -> Option<&str> {
        self.note.as_deref()
    }

    /// Converts the arguments into an unvalidated `Entry`, using `today` when no date was given.
    pub fn entry(&self, today: NaiveDate) -> Entry {
        Entry {
            kind: self.kind,
            date: self.date.unwrap_or(today),
            amount: self.amount,
            category: self.category.clone(),
            note: self.note.clone(),
        }
    }
}

/// Args for the `fin summary` and `fin dashboard` commands.
#[derive(Debug, Default, Parser, Clone)]
pub struct GoalArgs {
    /// The savings goal in percent, 0 to 100. Defaults to the goal in the config file.
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    goal: Option<u8>,
}

impl GoalArgs {
    pub fn new(goal: Option<u8>) -> Self {
        Self { goal }
    }

    pub fn goal(&self) -> Option<u8> {
        self.goal
    }
}

/// Args for the `fin analyze` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct AnalyzeArgs {
    /// The letter to count. Defaults to A.
    #[arg(long)]
    letter: Option<char>,
}

impl AnalyzeArgs {
    pub fn new(letter: Option<char>) -> Self {
        Self { letter }
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }
}

fn default_fin_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("fin"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --fin-home or FIN_HOME instead of relying on the default \
                fin home directory. If you continue using the program right now, you may have \
                problems!",
            );
            PathBuf::from("fin")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn new(path: PathBuf) -> Self {
        Self(path)
    }

    pub fn path(&self) -> &Path {
        &self.0
    }
}
