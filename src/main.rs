use clap::Parser;
use fin_tracker::args::{Args, Command};
use fin_tracker::{commands, Config, Result};
use std::process::ExitCode;
use tracing::{debug, error, trace};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let log_level = args.common().log_level();
    init_logger(log_level);
    debug!("Log level set to {}", log_level.to_string().to_lowercase());

    match main_inner(args).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Exiting with error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

pub async fn main_inner(args: Args) -> Result<()> {
    trace!("{args:?}");
    let home = args.common().fin_home().path();

    // Route to appropriate command handler
    let _: () = match args.command() {
        Command::Init(init_args) => commands::init(
            home,
            init_args.data_file().map(|p| p.to_path_buf()),
            init_args.goal(),
        )
        .await?
        .print(),

        Command::Add(add_args) => {
            let config = Config::load(home).await?;
            commands::add(config, add_args.clone()).await?.print()
        }

        Command::List => commands::list(Config::load(home).await?).await?.print(),

        Command::Summary(goal_args) => {
            let config = Config::load(home).await?;
            commands::summary(config, goal_args.clone()).await?.print()
        }

        Command::Insights => commands::insights(Config::load(home).await?)
            .await?
            .print(),

        Command::Analyze(analyze_args) => {
            let config = Config::load(home).await?;
            commands::analyze(config, analyze_args.clone())
                .await?
                .print()
        }

        Command::Dashboard(goal_args) => {
            let config = Config::load(home).await?;
            commands::dashboard(config, goal_args.clone())
                .await?
                .print()
        }
    };
    Ok(())
}

/// Initializes the tracing subscriber.
pub fn init_logger(level: LevelFilter) {
    let filter = match std::env::var("RUST_LOG").ok() {
        Some(_) => {
            // RUST_LOG exists; use it.
            EnvFilter::from_default_env()
        }
        None => {
            // RUST_LOG does not exist; use default log level for this crate only.
            EnvFilter::new(format!(
                "fin_tracker={},{}={}",
                level,
                env!("CARGO_CRATE_NAME"),
                level
            ))
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
