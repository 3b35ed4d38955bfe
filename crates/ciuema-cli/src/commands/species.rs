use std::path::PathBuf;
use std::time::Duration;

use chrono::NaiveDate;
use ciuema_catalog::image::image_to_data_url;
use ciuema_catalog::Catalog;
use ciuema_core::config::CiuemaConfig;
use ciuema_core::models::collection::CollectionId;
use ciuema_core::models::species::{normalize_code, Species, SpeciesDraft};
use ciuema_credentials::KeyringStore;
use ciuema_store::SqliteStore;
use clap::{Args, Subcommand};
use comfy_table::Table;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use super::{confirm, open_catalog};

#[derive(Subcommand)]
pub enum SpeciesAction {
    /// List species in a collection
    List {
        /// Collection id
        #[arg(long)]
        collection: String,
        /// Only codes containing this text (case-insensitive)
        #[arg(long)]
        search: Option<String>,
    },
    /// Show every field of a species
    Show {
        /// Collection id
        #[arg(long)]
        collection: String,
        /// Species code
        code: String,
    },
    /// Add a new species
    Add {
        /// Collection id
        #[arg(long)]
        collection: String,
        /// Unique species code (e.g. GUP-001)
        code: String,
        /// Common name
        #[arg(long)]
        name: String,
        /// Scientific name
        #[arg(long)]
        scientific_name: String,
        #[command(flatten)]
        details: SpeciesDetails,
    },
    /// Edit an existing species (the code cannot change)
    Edit {
        /// Collection id
        #[arg(long)]
        collection: String,
        /// Species code
        code: String,
        /// Common name
        #[arg(long)]
        name: Option<String>,
        /// Scientific name
        #[arg(long)]
        scientific_name: Option<String>,
        #[command(flatten)]
        details: SpeciesDetails,
    },
    /// Delete a species
    Delete {
        /// Collection id
        #[arg(long)]
        collection: String,
        /// Species code
        code: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

/// Optional species fields shared by `add` and `edit`.
#[derive(Args)]
pub struct SpeciesDetails {
    #[arg(long)]
    family: Option<String>,
    #[arg(long)]
    order: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    habitat: Option<String>,
    #[arg(long)]
    location: Option<String>,
    /// Sampling point number
    #[arg(long)]
    point_number: Option<String>,
    /// Capture date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_capture_date)]
    capture_date: Option<String>,
    #[arg(long)]
    fishing_gear: Option<String>,
    /// Photo of the specimen
    #[arg(long)]
    image: Option<PathBuf>,
    /// Draft the description with the text generator
    #[arg(long, conflicts_with = "description")]
    generate_description: bool,
}

fn parse_capture_date(s: &str) -> Result<String, String> {
    if s.is_empty() {
        return Ok(String::new());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD"))
}

impl SpeciesDetails {
    /// Copy every given field onto `draft`.
    fn apply(self, draft: &mut SpeciesDraft) -> anyhow::Result<()> {
        let fields = [
            (self.family, &mut draft.family),
            (self.order, &mut draft.order),
            (self.description, &mut draft.description),
            (self.habitat, &mut draft.habitat),
            (self.location, &mut draft.location),
            (self.point_number, &mut draft.point_number),
            (self.capture_date, &mut draft.capture_date),
            (self.fishing_gear, &mut draft.fishing_gear),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(path) = self.image {
            draft.image_url = image_to_data_url(&path)?;
        }
        Ok(())
    }
}

/// Open the catalog and select `collection` for the signed-in user.
fn open_collection(collection: &str) -> anyhow::Result<Catalog<SqliteStore>> {
    let mut catalog = open_catalog()?;
    if catalog.current_user().is_none() {
        anyhow::bail!("Not signed in. Use `ciuema login <user>` first.");
    }
    catalog.select_collection(&CollectionId::from(collection))?;
    Ok(catalog)
}

async fn generate_description(draft: &SpeciesDraft) -> anyhow::Result<String> {
    let config = CiuemaConfig::load()?;
    let generator = ciuema_describe::from_config(&config.describe, &KeyringStore::new())?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg}")?
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message(format!("describing {}", draft.name));

    let text = ciuema_describe::describe(
        generator.as_deref(),
        &draft.name,
        &draft.scientific_name,
    )
    .await;
    pb.finish_and_clear();
    Ok(text)
}

pub async fn run(action: SpeciesAction) -> anyhow::Result<()> {
    match action {
        SpeciesAction::List { collection, search } => {
            let catalog = open_collection(&collection)?;
            let term = search.unwrap_or_default();
            let species = catalog.search_species(&term)?;

            if species.is_empty() {
                if term.is_empty() {
                    println!("No species yet. Use `ciuema species add` to catalog one.");
                } else {
                    println!("No species match '{term}'.");
                }
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["CODE", "NAME", "SCIENTIFIC NAME", "FAMILY", "CAPTURED"]);
            for s in &species {
                table.add_row(vec![
                    s.id.as_str(),
                    s.name.as_str(),
                    s.scientific_name.as_str(),
                    s.family.as_str(),
                    s.capture_date.as_str(),
                ]);
            }
            println!("{table}");
            println!("\n{} species", species.len());
            Ok(())
        }
        SpeciesAction::Show { collection, code } => {
            let catalog = open_collection(&collection)?;
            let species = catalog
                .active_collection()
                .and_then(|c| c.find_species(&code))
                .ok_or_else(|| anyhow::anyhow!("Species '{}' not found", code))?;

            println!("Code:            {}", species.id);
            println!("Name:            {}", species.name);
            println!("Scientific name: {}", species.scientific_name);
            println!("Family:          {}", species.family);
            println!("Order:           {}", species.order);
            println!("Habitat:         {}", species.habitat);
            println!("Location:        {}", species.location);
            println!("Point number:    {}", species.point_number);
            println!("Capture date:    {}", species.capture_date);
            println!("Fishing gear:    {}", species.fishing_gear);
            if species.image_url.starts_with("data:") {
                println!("Image:           embedded ({} bytes)", species.image_url.len());
            } else {
                println!("Image:           {}", species.image_url);
            }
            if !species.description.is_empty() {
                println!("\n{}", species.description);
            }
            Ok(())
        }
        SpeciesAction::Add {
            collection,
            code,
            name,
            scientific_name,
            details,
        } => {
            let mut catalog = open_collection(&collection)?;
            let generate = details.generate_description;
            let mut draft = SpeciesDraft {
                id: code,
                name,
                scientific_name,
                ..SpeciesDraft::default()
            };
            details.apply(&mut draft)?;
            draft.validate()?;
            if generate {
                draft.description = generate_description(&draft).await?;
            }

            let species = Species::from(draft);
            let code = species.id.clone();
            catalog.add_species(species)?;
            println!("{} Added {}", style("✓").green(), style(code).bold());
            Ok(())
        }
        SpeciesAction::Edit {
            collection,
            code,
            name,
            scientific_name,
            details,
        } => {
            let mut catalog = open_collection(&collection)?;
            let mut draft = catalog
                .active_collection()
                .and_then(|c| c.find_species(&code))
                .map(SpeciesDraft::from)
                .ok_or_else(|| anyhow::anyhow!("Species '{}' not found", normalize_code(&code)))?;

            if let Some(name) = name {
                draft.name = name;
            }
            if let Some(scientific_name) = scientific_name {
                draft.scientific_name = scientific_name;
            }
            let generate = details.generate_description;
            details.apply(&mut draft)?;
            draft.validate()?;
            if generate {
                draft.description = generate_description(&draft).await?;
            }

            let species = Species::from(draft);
            let code = species.id.clone();
            catalog.save_species(species)?;
            println!("{} Updated {}", style("✓").green(), style(code).bold());
            Ok(())
        }
        SpeciesAction::Delete {
            collection,
            code,
            yes,
        } => {
            let mut catalog = open_collection(&collection)?;
            let species = catalog
                .active_collection()
                .and_then(|c| c.find_species(&code))
                .ok_or_else(|| anyhow::anyhow!("Species '{}' not found", normalize_code(&code)))?;
            let question = format!(
                "Delete species \"{}\" ({})? This cannot be undone.",
                species.name, species.id
            );
            let code = species.id.clone();
            if !yes && !confirm(&question)? {
                println!("Cancelled.");
                return Ok(());
            }
            catalog.delete_species(&code)?;
            println!("{} Deleted {}", style("✓").green(), code);
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_capture_date() {
        assert_eq!(parse_capture_date("2024-03-09").unwrap(), "2024-03-09");
        assert_eq!(parse_capture_date("").unwrap(), "");
        assert!(parse_capture_date("09/03/2024").is_err());
        assert!(parse_capture_date("2024-02-30").is_err());
    }

    #[test]
    fn test_details_apply_only_given_fields() {
        let mut draft = SpeciesDraft::from(&Species::new(
            "GUP-001",
            "Guppy",
            "Poecilia reticulata",
        ));
        draft.habitat = "streams".into();
        let details = SpeciesDetails {
            family: Some("Poeciliidae".into()),
            order: None,
            description: None,
            habitat: None,
            location: Some("Belém".into()),
            point_number: None,
            capture_date: None,
            fishing_gear: None,
            image: None,
            generate_description: false,
        };
        details.apply(&mut draft).unwrap();
        assert_eq!(draft.family, "Poeciliidae");
        assert_eq!(draft.location, "Belém");
        assert_eq!(draft.habitat, "streams");
        assert_eq!(Species::from(draft).id, "GUP-001");
    }
}
