use clap::Args;
use console::style;

use super::open_catalog;

#[derive(Args)]
pub struct LoginArgs {
    /// User id (any non-empty name, e.g. "jsilva")
    user: String,
}

pub fn login(args: LoginArgs) -> anyhow::Result<()> {
    let mut catalog = open_catalog()?;
    catalog.login(&args.user)?;
    let user = catalog.current_user().unwrap_or_default();
    println!("{} Signed in as {}", style("✓").green(), style(user).bold());
    Ok(())
}

pub fn logout() -> anyhow::Result<()> {
    let mut catalog = open_catalog()?;
    catalog.logout()?;
    println!("Signed out.");
    Ok(())
}

pub fn whoami() -> anyhow::Result<()> {
    let catalog = open_catalog()?;
    match catalog.current_user() {
        Some(user) => {
            let visible = catalog.visible_collections().len();
            println!("{user} ({visible} collections)");
        }
        None => println!("Not signed in. Use `ciuema login <user>`."),
    }
    Ok(())
}
