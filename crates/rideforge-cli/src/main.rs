//! Rideforge CLI - vehicle concept generation for the Rideforge collection

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{catalog, db, generate, honorary};

#[derive(Parser)]
#[command(name = "rideforge")]
#[command(about = "AI vehicle concept generator with faction lore and biome environments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one or more vehicles
    Generate {
        /// Faction key (random when omitted)
        #[arg(long)]
        faction: Option<String>,

        /// Vehicle archetype key (random when omitted)
        #[arg(long)]
        archetype: Option<String>,

        /// Biome key (random when omitted)
        #[arg(long)]
        biome: Option<String>,

        /// Aesthetic style key (random when omitted)
        #[arg(long)]
        style: Option<String>,

        /// Verbatim variant name override
        #[arg(long)]
        variant: Option<String>,

        /// Honoree label for tribute vehicles, e.g. "Satoshi (Bitcoin)"
        #[arg(long)]
        honoree: Option<String>,

        /// Extra trait, repeatable
        #[arg(long = "trait")]
        traits: Vec<String>,

        /// Number of vehicles to generate
        #[arg(long, default_value = "1")]
        count: usize,

        /// Batch label grouping this run's records
        #[arg(long, default_value = "Adhoc")]
        batch: String,

        /// Provider to use (openai, mock)
        #[arg(long)]
        provider: Option<String>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Archive backend (drive, dir); defaults to config, local-only when unset
        #[arg(long)]
        archive: Option<String>,

        /// Append counter suffixes instead of failing on id collisions
        #[arg(long)]
        disambiguate: bool,

        /// Output directory for downloaded images
        #[arg(long)]
        output: Option<String>,

        /// Database path
        #[arg(long)]
        db: Option<String>,

        /// Faction data file (defaults to data/factions.toml)
        #[arg(long)]
        factions: Option<String>,
    },

    /// Create an honorary tribute vehicle
    Honorary {
        /// Honoree name, e.g. "Satoshi"
        #[arg(long)]
        name: String,

        /// Honoree organization, e.g. "Bitcoin"
        #[arg(long)]
        org: String,

        /// Aesthetic style key (defaults to rough_cool_tattoo)
        #[arg(long)]
        style: Option<String>,

        /// Extra trait, repeatable
        #[arg(long = "trait")]
        traits: Vec<String>,

        /// Provider to use (openai, mock)
        #[arg(long)]
        provider: Option<String>,

        /// Random seed for reproducibility
        #[arg(long)]
        seed: Option<u64>,

        /// Archive backend (drive, dir)
        #[arg(long)]
        archive: Option<String>,

        /// Output directory for downloaded images
        #[arg(long)]
        output: Option<String>,

        /// Database path
        #[arg(long)]
        db: Option<String>,

        /// Faction data file (defaults to data/factions.toml)
        #[arg(long)]
        factions: Option<String>,
    },

    /// Show catalog reference data
    Catalog {
        /// Category: factions, archetypes, biomes, styles
        category: String,

        /// Faction data file (defaults to data/factions.toml)
        #[arg(long)]
        factions: Option<String>,
    },

    /// Asset database operations
    #[command(subcommand)]
    Db(db::DbCommands),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            faction,
            archetype,
            biome,
            style,
            variant,
            honoree,
            traits,
            count,
            batch,
            provider,
            seed,
            archive,
            disambiguate,
            output,
            db,
            factions,
        } => generate::run(generate::GenerateRun {
            faction,
            archetype,
            biome,
            style,
            variant,
            honoree,
            traits,
            count,
            batch,
            provider,
            seed,
            archive,
            disambiguate,
            output,
            db,
            factions,
        }),
        Commands::Honorary {
            name,
            org,
            style,
            traits,
            provider,
            seed,
            archive,
            output,
            db,
            factions,
        } => honorary::run(honorary::HonoraryRun {
            name,
            org,
            style,
            traits,
            provider,
            seed,
            archive,
            output,
            db,
            factions,
        }),
        Commands::Catalog { category, factions } => catalog::run(&category, factions.as_deref()),
        Commands::Db(cmd) => db::run(cmd),
    }
}
