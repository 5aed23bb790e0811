//! Command-line front end for account-number generation and validation.
//!
//! Results are printed to stdout as JSON; logs go to stderr.
//!
//! # Environment Variables
//! - `ACCTNUM_DEFAULT_PREFIX`: prefix used when `--prefix` is omitted (default: "USR")
//! - `ACCTNUM_COUNTER_START`: first sequence value (default: 1)
//! - `RUST_LOG`: log filter (default directive: "acctnum=info")

use acctnum_core::{
    check_digit, config::CoreConfig, constants, AccountService, KnownPrefix,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "acctnum")]
#[command(about = "Account-number generator and validator")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one account number
    Generate {
        /// Fixed account category
        #[arg(long, value_enum, conflicts_with = "prefix")]
        kind: Option<Kind>,
        /// Custom prefix (1-5 letters)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Generate several account numbers
    Batch {
        /// How many numbers to generate (1-1000)
        count: usize,
        /// Custom prefix (1-5 letters)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Generate one account number with generation details
    Detailed {
        /// Custom prefix (1-5 letters)
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Validate one or more account numbers
    Validate {
        #[arg(required = true)]
        numbers: Vec<String>,
    },
    /// Check the format only (no check digit, no prefix lookup)
    CheckFormat { number: String },
    /// Check only whether the prefix is known
    CheckPrefix { number: String },
    /// Print the prefix of an account number
    Prefix { number: String },
    /// Break a valid account number into its parts
    Info { number: String },
    /// Compute the check digit of a string
    Checksum { text: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Kind {
    User,
    Bet,
    Transaction,
    Pool,
    Admin,
    System,
    Report,
    Log,
}

impl From<Kind> for KnownPrefix {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::User => KnownPrefix::User,
            Kind::Bet => KnownPrefix::Bet,
            Kind::Transaction => KnownPrefix::Transaction,
            Kind::Pool => KnownPrefix::Pool,
            Kind::Admin => KnownPrefix::Admin,
            Kind::System => KnownPrefix::System,
            Kind::Report => KnownPrefix::Report,
            Kind::Log => KnownPrefix::Log,
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("acctnum=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let cfg = CoreConfig::from_env_values(
        std::env::var(constants::DEFAULT_PREFIX_ENV).ok(),
        std::env::var(constants::COUNTER_START_ENV).ok(),
    )?;
    tracing::debug!(
        "default prefix {}, counter start {}",
        cfg.default_prefix(),
        cfg.counter_start()
    );
    let service = AccountService::new(Arc::new(cfg))?;

    match cli.command {
        Some(Commands::Generate { kind, prefix }) => {
            let number = match kind {
                Some(kind) => service.generate_kind(kind.into())?,
                None => service.generate(prefix.as_deref())?,
            };
            print_json(&number)?;
        }
        Some(Commands::Batch { count, prefix }) => {
            print_json(&service.generate_batch(prefix.as_deref(), count)?)?;
        }
        Some(Commands::Detailed { prefix }) => {
            print_json(&service.generate_detailed(prefix.as_deref())?)?;
        }
        Some(Commands::Validate { numbers }) => {
            if let [number] = numbers.as_slice() {
                print_json(&service.validate(Some(number.as_str())))?;
            } else {
                print_json(&service.validate_many(&numbers))?;
            }
        }
        Some(Commands::CheckFormat { number }) => {
            print_json(&service.is_well_formed(&number))?;
        }
        Some(Commands::CheckPrefix { number }) => {
            print_json(&service.has_known_prefix(&number))?;
        }
        Some(Commands::Prefix { number }) => {
            print_json(&service.extract_prefix(&number)?)?;
        }
        Some(Commands::Info { number }) => {
            print_json(&service.describe(&number)?)?;
        }
        Some(Commands::Checksum { text }) => {
            print_json(&check_digit(&text.trim().to_uppercase()))?;
        }
        None => {
            println!("Use 'acctnum --help' for commands");
        }
    }

    Ok(())
}
