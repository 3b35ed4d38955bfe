use std::path::PathBuf;

use ciuema_catalog::image::image_to_data_url;
use ciuema_catalog::CollectionPatch;
use ciuema_core::models::collection::CollectionId;
use clap::Subcommand;
use comfy_table::{Cell, Color, Table};
use console::style;

use super::{confirm, open_catalog};

#[derive(Subcommand)]
pub enum CollectionAction {
    /// List collections you can access
    List,
    /// Create a new collection
    Create {
        /// Collection name
        name: String,
        /// Cover image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Show details of a collection
    Show {
        /// Collection id
        id: String,
    },
    /// Rename a collection or replace its image (owner only)
    Update {
        /// Collection id
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New cover image file
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Give another user access (owner only)
    Share {
        /// Collection id
        id: String,
        /// User id to add
        user: String,
    },
    /// Revoke a user's access (owner only)
    Unshare {
        /// Collection id
        id: String,
        /// User id to remove
        user: String,
    },
    /// Delete a collection and all of its species (owner only)
    Delete {
        /// Collection id
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

pub fn run(action: CollectionAction) -> anyhow::Result<()> {
    let mut catalog = open_catalog()?;
    let Some(user) = catalog.current_user().map(str::to_string) else {
        anyhow::bail!("Not signed in. Use `ciuema login <user>` first.");
    };

    match action {
        CollectionAction::List => {
            let collections = catalog.visible_collections();
            if collections.is_empty() {
                println!("No collections found. Use `ciuema collection create` to start one.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["ID", "NAME", "OWNER", "SPECIES", "ROLE"]);
            for col in &collections {
                let (role, color) = if col.is_owner(&user) {
                    ("owner", Color::Green)
                } else {
                    ("member", Color::White)
                };
                table.add_row(vec![
                    Cell::new(col.id.as_str()),
                    Cell::new(&col.name),
                    Cell::new(&col.owner_id),
                    Cell::new(col.species.len().to_string()),
                    Cell::new(role).fg(color),
                ]);
            }
            println!("{table}");
            println!("\n{} collections total", collections.len());
            Ok(())
        }
        CollectionAction::Create { name, image } => {
            let image_url = image.as_deref().map(image_to_data_url).transpose()?;
            let id = catalog.create_collection(&name, image_url)?;
            println!(
                "{} Created collection {} ({})",
                style("✓").green(),
                style(name.trim()).bold(),
                id
            );
            Ok(())
        }
        CollectionAction::Show { id } => {
            let col = catalog.select_collection(&CollectionId::from(id.as_str()))?;

            println!("Id:              {}", col.id);
            println!("Name:            {}", col.name);
            println!("Owner:           {}", col.owner_id);
            println!("Species:         {}", col.species.len());
            if col.image_url.starts_with("data:") {
                println!("Image:           embedded ({} bytes)", col.image_url.len());
            } else {
                println!("Image:           {}", col.image_url);
            }
            println!("\nAuthorized users:");
            for member in &col.authorized_users {
                if col.is_owner(member) {
                    println!("  {member} (owner)");
                } else {
                    println!("  {member}");
                }
            }
            Ok(())
        }
        CollectionAction::Update { id, name, image } => {
            if name.is_none() && image.is_none() {
                anyhow::bail!("Nothing to update. Pass --name and/or --image.");
            }
            let image_url = image.as_deref().map(image_to_data_url).transpose()?;
            let id = CollectionId::from(id.as_str());
            catalog.update_collection(
                &id,
                CollectionPatch {
                    name,
                    image_url,
                    ..CollectionPatch::default()
                },
            )?;
            println!("{} Updated collection {}", style("✓").green(), id);
            Ok(())
        }
        CollectionAction::Share { id, user: member } => {
            let id = CollectionId::from(id.as_str());
            catalog.share_collection(&id, &member)?;
            println!("{} {} can now access {}", style("✓").green(), member.trim(), id);
            Ok(())
        }
        CollectionAction::Unshare { id, user: member } => {
            let id = CollectionId::from(id.as_str());
            catalog.unshare_collection(&id, &member)?;
            println!("{} Removed {} from {}", style("✓").green(), member.trim(), id);
            Ok(())
        }
        CollectionAction::Delete { id, yes } => {
            let id = CollectionId::from(id.as_str());
            let col = catalog.collection(&id)?;
            let question = format!(
                "Delete collection \"{}\" and its {} species? This cannot be undone.",
                col.name,
                col.species.len()
            );
            if !yes && !confirm(&question)? {
                println!("Cancelled.");
                return Ok(());
            }
            catalog.delete_collection(&id)?;
            println!("{} Deleted collection {}", style("✓").green(), id);
            Ok(())
        }
    }
}
