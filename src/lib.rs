pub mod args;
pub mod commands;
mod config;
mod error;
pub mod model;
pub mod report;
pub mod store;
mod utils;


pub use config::{Config, DEFAULT_SAVINGS_GOAL};
pub use error::Error;
pub use error::Result;
