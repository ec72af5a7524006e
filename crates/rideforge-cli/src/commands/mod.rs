//! CLI command implementations

pub mod catalog;
pub mod db;
pub mod generate;
pub mod honorary;

use anyhow::Result;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rideforge_gen::archive::{create_archive, ArchiveProvider};
use rideforge_gen::{Catalog, ForgeConfig};
use std::path::Path;

/// Load the layered config, falling back to defaults when unreadable
pub(crate) fn load_config() -> ForgeConfig {
    ForgeConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: could not load config: {}. Using defaults.", e);
        ForgeConfig::empty()
    })
}

/// Load the catalog from an explicit faction file or the default locations
pub(crate) fn load_catalog(factions: Option<&str>) -> Catalog {
    match factions {
        Some(path) => Catalog::load(Path::new(path)),
        None => Catalog::discover(),
    }
}

/// Seeded RNG when `--seed` is given, entropy-seeded otherwise
pub(crate) fn build_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Resolve the archive backend: explicit flag wins, then config, then none.
/// Failures degrade to local-only storage with a warning.
pub(crate) fn build_archive(
    flag: Option<&str>,
    config: &ForgeConfig,
) -> Result<Option<Box<dyn ArchiveProvider>>> {
    let name = match flag {
        Some(name) => Some(name.to_string()),
        None => config.generation.archive.clone(),
    };

    match name {
        Some(name) => match create_archive(&name, config) {
            Ok(archive) => Ok(Some(archive)),
            Err(e) => {
                eprintln!("Warning: archive '{}' unavailable, storing locally only: {}", name, e);
                Ok(None)
            }
        },
        None => Ok(None),
    }
}
