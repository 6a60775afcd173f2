use anyhow::Result;

use crate::config::Settings;

pub fn list_repositories(settings: &Settings) -> Result<()> {
    let catalog = &settings.catalog;
    let default_key = &catalog.default_option().key;

    for option in catalog.repositories() {
        let marker = if &option.key == default_key { "*" } else { " " };
        println!("{} {:<40} {}", marker, option.key, option.label);
    }
    Ok(())
}
