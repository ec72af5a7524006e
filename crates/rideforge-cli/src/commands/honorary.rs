//! Honorary tribute vehicle command

use super::{build_archive, build_rng, load_catalog, load_config};
use anyhow::Result;
use rideforge_gen::providers::create_provider;
use rideforge_gen::{Forge, ForgeOptions};
use rideforge_store::AssetStore;
use std::path::PathBuf;

/// Arguments for one `rideforge honorary` invocation
pub struct HonoraryRun {
    pub name: String,
    pub org: String,
    pub style: Option<String>,
    pub traits: Vec<String>,
    pub provider: Option<String>,
    pub seed: Option<u64>,
    pub archive: Option<String>,
    pub output: Option<String>,
    pub db: Option<String>,
    pub factions: Option<String>,
}

pub fn run(args: HonoraryRun) -> Result<()> {
    let config = load_config();
    let catalog = load_catalog(args.factions.as_deref());

    let provider_name = args
        .provider
        .as_deref()
        .unwrap_or(&config.generation.provider);
    let provider =
        create_provider(provider_name, &config).map_err(|e| anyhow::anyhow!("{}", e))?;

    let archive = build_archive(args.archive.as_deref(), &config)?;

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| config.generation.db_path.clone());
    let store = AssetStore::open(&db_path).map_err(|e| anyhow::anyhow!("{}", e))?;

    let forge = Forge::new(&catalog, provider, archive, &store);

    let opts = ForgeOptions {
        output_dir: PathBuf::from(
            args.output
                .clone()
                .unwrap_or_else(|| config.generation.output_dir.clone()),
        ),
        creator: config.generation.creator.clone(),
        size: config.generation.size,
        quality: config.generation.quality,
        ..Default::default()
    };

    println!("Creating honorary vehicle for {} ({})...", args.name, args.org);

    let mut rng = build_rng(args.seed);
    let record = forge
        .honorary(
            &args.name,
            &args.org,
            args.style.as_deref(),
            &args.traits,
            &opts,
            &mut rng,
        )
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Created: {}", record.variant);
    println!("  Image id: {}", record.image_id);
    println!("  File: {}", record.file_path);
    println!("  Tags: {}", record.tags.join(", "));
    if let Some(link) = &record.archive_link {
        println!("  Archive: {}", link);
    }

    Ok(())
}
