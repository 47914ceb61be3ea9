use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;

pub mod commands;

use commands::{init_database, loan, migrate_and_serve, serve, LoanArgs};

#[derive(Parser)]
#[command(name = "fintrack")]
#[command(about = "Personal and small-business finance tracker with a JSON API")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Connection options shared by the server commands. Anything left unset
/// falls back to `fintrack.toml` and then to the built-in defaults.
#[derive(Args, Debug, Clone, Default)]
pub struct ServerArgs {
    /// Database URL, e.g. sqlite://fintrack.db?mode=rwc
    #[arg(short, long, env = "FINTRACK_DATABASE_URL")]
    pub database_url: Option<String>,

    /// Bind address for the web server
    ///
    /// Format: IP:PORT (e.g., 0.0.0.0:3000, 127.0.0.1:8080)
    #[arg(short, long, env = "FINTRACK_BIND_ADDRESS")]
    pub bind_address: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server on an initialized database
    Serve {
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Initialize the database using migrations
    InitDb {
        /// Database URL
        ///
        /// For SQLite add `?mode=rwc` so the file is created when missing.
        #[arg(short, long, env = "FINTRACK_DATABASE_URL")]
        database_url: Option<String>,
    },
    /// Apply pending migrations, then start the web server
    MigrateAndServe {
        #[command(flatten)]
        server: ServerArgs,
    },
    /// Check a mortgage offline and print the result
    Loan(LoanArgs),
}

/// Clap value parser for money amounts ("1,500,000" is accepted).
pub fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    compute::money::parse_amount(raw).map_err(|err| err.to_string())
}

pub fn parse_rate(raw: &str) -> Result<Decimal, String> {
    compute::money::parse_rate(raw).map_err(|err| err.to_string())
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Serve { server } => {
                serve(server).await?;
            }
            Commands::InitDb { database_url } => {
                init_database(database_url).await?;
            }
            Commands::MigrateAndServe { server } => {
                migrate_and_serve(server).await?;
            }
            Commands::Loan(args) => {
                loan(args)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn server_flags_are_optional() {
        let cli = Cli::try_parse_from(["fintrack", "serve", "--bind-address", "127.0.0.1:8080"])
            .unwrap();
        match cli.command {
            Commands::Serve { server } => {
                assert_eq!(server.bind_address.as_deref(), Some("127.0.0.1:8080"));
            }
            _ => panic!("expected the serve command"),
        }
    }

    #[test]
    fn loan_amounts_accept_separators() {
        let cli = Cli::try_parse_from([
            "fintrack",
            "loan",
            "--loan-amount",
            "8,000,000",
            "--down-payment",
            "2,000,000",
            "--years",
            "30",
            "--rate",
            "2.1",
        ])
        .unwrap();
        match cli.command {
            Commands::Loan(args) => {
                assert_eq!(args.loan_amount, dec!(8000000));
                assert_eq!(args.rate, dec!(2.1));
                assert!(args.monthly_income.is_none());
                assert!(!args.schedule);
            }
            _ => panic!("expected the loan command"),
        }
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert!(parse_decimal("-5").is_err());
        assert!(parse_decimal("abc").is_err());
        assert!(parse_decimal("0.001").is_err());
        assert_eq!(parse_rate("2.125").unwrap(), dec!(2.125));
    }
}
