use serde::{Deserialize, Serialize};

/// The kind of a transaction. On disk the kind is written to the `Type` column exactly as the
/// variant name is spelled, and it is matched case-sensitively when loading.
#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    Hash,
    Serialize,
    Deserialize,
    clap::ValueEnum,
)]
pub enum Kind {
    /// Money coming in, e.g. a salary.
    Income,
    /// Money spent, e.g. rent or groceries.
    Expense,
    /// Money set aside into investments. Reduces the net balance like an expense does.
    Investment,
}

serde_plain::derive_display_from_serialize!(Kind);
serde_plain::derive_fromstr_from_deserialize!(Kind);
