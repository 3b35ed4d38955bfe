pub mod collection;
pub mod config;
pub mod describe;
pub mod session;
pub mod species;

use std::io::Write;

use ciuema_catalog::Catalog;
use ciuema_core::config::CiuemaConfig;
use ciuema_store::SqliteStore;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum Command {
    /// Initialize and show configuration
    Config {
        #[command(subcommand)]
        action: config::ConfigAction,
    },
    /// Sign in with a user id
    Login(session::LoginArgs),
    /// Sign out
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Manage collections
    Collection {
        #[command(subcommand)]
        action: collection::CollectionAction,
    },
    /// Manage species within a collection
    Species {
        #[command(subcommand)]
        action: species::SpeciesAction,
    },
    /// Draft species descriptions with the text generator
    Describe {
        #[command(subcommand)]
        action: describe::DescribeAction,
    },
}

pub async fn run(cmd: Command) -> anyhow::Result<()> {
    match cmd {
        Command::Config { action } => config::run(action),
        Command::Login(args) => session::login(args),
        Command::Logout => session::logout(),
        Command::Whoami => session::whoami(),
        Command::Collection { action } => collection::run(action),
        Command::Species { action } => species::run(action).await,
        Command::Describe { action } => describe::run(action).await,
    }
}

/// Open the catalog stored in the default database.
pub(crate) fn open_catalog() -> anyhow::Result<Catalog<SqliteStore>> {
    let db_path = CiuemaConfig::db_path()?;
    let store = SqliteStore::open(&db_path)?;
    Ok(Catalog::open(store))
}

/// Ask a yes/no question on stderr; anything but "y" or "yes" is no.
pub(crate) fn confirm(question: &str) -> anyhow::Result<bool> {
    eprint!("{question} [y/N]: ");
    std::io::stderr().flush()?;
    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim().to_lowercase().as_str(), "y" | "yes"))
}
