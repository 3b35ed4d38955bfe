use ciuema_core::config::CiuemaConfig;
use ciuema_store::SqliteStore;
use clap::Subcommand;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Initialize ~/.ciuema/ with default config and database
    Init,
    /// Show current configuration
    Show,
}

pub fn run(action: ConfigAction) -> anyhow::Result<()> {
    match action {
        ConfigAction::Init => {
            let home = CiuemaConfig::init()?;
            let db_path = CiuemaConfig::db_path()?;

            // Ensure database is created with schema
            SqliteStore::open(&db_path)?;

            println!("Initialized ciuema at {}", home.display());
            println!("  config: {}", CiuemaConfig::config_path()?.display());
            println!("  database: {}", db_path.display());
            Ok(())
        }
        ConfigAction::Show => {
            let config = CiuemaConfig::load()?;
            let toml_str = toml::to_string_pretty(&config)?;
            println!("{toml_str}");
            Ok(())
        }
    }
}
