//! Vehicle generation command

use super::{build_archive, build_rng, load_catalog, load_config};
use anyhow::Result;
use rideforge_gen::batch::run_batch;
use rideforge_gen::providers::create_provider;
use rideforge_gen::{Forge, ForgeOptions, GenerationParams};
use rideforge_store::AssetStore;
use std::path::PathBuf;

/// Arguments for one `rideforge generate` invocation
pub struct GenerateRun {
    pub faction: Option<String>,
    pub archetype: Option<String>,
    pub biome: Option<String>,
    pub style: Option<String>,
    pub variant: Option<String>,
    pub honoree: Option<String>,
    pub traits: Vec<String>,
    pub count: usize,
    pub batch: String,
    pub provider: Option<String>,
    pub seed: Option<u64>,
    pub archive: Option<String>,
    pub disambiguate: bool,
    pub output: Option<String>,
    pub db: Option<String>,
    pub factions: Option<String>,
}

pub fn run(args: GenerateRun) -> Result<()> {
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
        batch: args.batch.clone(),
        creator: config.generation.creator.clone(),
        size: config.generation.size,
        quality: config.generation.quality,
        disambiguate_ids: args.disambiguate,
        archive_subfolder: None,
    };

    let params = GenerationParams {
        faction: args.faction,
        archetype: args.archetype,
        biome: args.biome,
        style: args.style,
        honoree: args.honoree,
        variant: args.variant,
        extra_traits: args.traits,
    };

    let requests = vec![params; args.count.max(1)];

    let mut rng = build_rng(args.seed);
    let outcome = run_batch(&forge, &requests, &opts, &mut rng);

    if outcome.generated == 0 && outcome.failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}
