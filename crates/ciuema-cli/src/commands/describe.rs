use ciuema_core::config::CiuemaConfig;
use ciuema_credentials::{CredentialStore, KeyringStore, DESCRIBE_API_KEY};
use clap::Subcommand;
use console::style;

#[derive(Subcommand)]
pub enum DescribeAction {
    /// Draft a description from a common and a scientific name
    Generate {
        /// Common name
        name: String,
        /// Scientific name
        scientific_name: String,
    },
    /// Store the generator API key in the OS keychain
    SetKey {
        /// API key (will prompt if not provided)
        #[arg(long)]
        key: Option<String>,
    },
    /// Remove the stored API key
    ClearKey,
}

pub async fn run(action: DescribeAction) -> anyhow::Result<()> {
    let cred_store = KeyringStore::new();

    match action {
        DescribeAction::Generate {
            name,
            scientific_name,
        } => {
            if name.trim().is_empty() || scientific_name.trim().is_empty() {
                anyhow::bail!("Both the common and the scientific name are required");
            }
            let config = CiuemaConfig::load()?;
            let generator = ciuema_describe::from_config(&config.describe, &cred_store)?;
            let text =
                ciuema_describe::describe(generator.as_deref(), &name, &scientific_name).await;
            println!("{text}");
            Ok(())
        }
        DescribeAction::SetKey { key } => {
            let key = match key {
                Some(k) => k,
                None => {
                    eprint!("Enter API key: ");
                    let mut input = String::new();
                    std::io::stdin().read_line(&mut input)?;
                    input.trim().to_string()
                }
            };

            if key.is_empty() {
                anyhow::bail!("API key cannot be empty");
            }

            cred_store.store(DESCRIBE_API_KEY, &key)?;
            println!("{} API key stored in keychain", style("✓").green());
            Ok(())
        }
        DescribeAction::ClearKey => {
            cred_store.delete(DESCRIBE_API_KEY)?;
            println!("API key removed.");
            Ok(())
        }
    }
}
