//! Catalog inspection command

use super::load_catalog;
use anyhow::Result;
use rideforge_gen::catalog::{CAMERA_VIEWS, LIGHTING_SETUPS};

pub fn run(category: &str, factions_file: Option<&str>) -> Result<()> {
    let catalog = load_catalog(factions_file);

    match category {
        "factions" => {
            let keys = catalog.faction_keys();
            println!("{} faction(s):\n", keys.len());
            for key in keys {
                let info = catalog
                    .faction(key)
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
                println!("  {} - {}", key, info.archetype);
                println!("    style: {}", info.style);
                println!("    themes: {}", info.vehicle_themes.join(", "));
                if !info.subfactions.is_empty() {
                    for (sub, desc) in &info.subfactions {
                        println!("    subfaction {}: {}", sub, desc);
                    }
                }
            }
        }
        "archetypes" => {
            for key in catalog.archetype_keys() {
                let desc = catalog
                    .archetype_desc(key)
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
                println!("  {} - {}", key, desc);
            }
        }
        "biomes" => {
            for key in catalog.biome_keys() {
                let desc = catalog
                    .biome_desc(key)
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
                println!("  {} - {}", key, desc);
            }
        }
        "styles" => {
            for key in catalog.style_keys() {
                let desc = catalog
                    .style_desc(key)
                    .map_err(|e| anyhow::anyhow!("{}", e))?;
                println!("  {} - {}", key, desc);
            }
            println!("\nCamera views: {}", CAMERA_VIEWS.join(", "));
            println!("Lighting: {}", LIGHTING_SETUPS.join(", "));
        }
        _ => anyhow::bail!(
            "Unknown category '{}'. Use: factions, archetypes, biomes, styles",
            category
        ),
    }

    Ok(())
}
