//! Asset database reporting commands
//!
//! Read-only consumers of the record store: list, per-field counts, and a
//! full JSON snapshot export.

use anyhow::Result;
use clap::Subcommand;
use rideforge_store::{AssetStore, GroupField, RecordFilter};

const DEFAULT_DB: &str = "rideforge_assets.db";

#[derive(Subcommand)]
pub enum DbCommands {
    /// List stored vehicles, newest first
    List {
        /// Filter by faction key
        #[arg(long)]
        faction: Option<String>,

        /// Filter by batch label
        #[arg(long)]
        batch: Option<String>,

        /// Only honorary tribute vehicles
        #[arg(long)]
        honorary: bool,

        /// Database path
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Count vehicles grouped by one field
    Stats {
        /// Field: faction, archetype, biome, style, batch
        #[arg(long, default_value = "faction")]
        by: String,

        /// Database path
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },

    /// Export all records to a JSON snapshot
    Export {
        /// Output path (defaults to rideforge_export.json)
        #[arg(long, default_value = "rideforge_export.json")]
        output: String,

        /// Database path
        #[arg(long, default_value = DEFAULT_DB)]
        db: String,
    },
}

pub fn run(cmd: DbCommands) -> Result<()> {
    match cmd {
        DbCommands::List {
            faction,
            batch,
            honorary,
            db,
            format,
        } => run_list(faction, batch, honorary, &db, &format),
        DbCommands::Stats { by, db } => run_stats(&by, &db),
        DbCommands::Export { output, db } => run_export(&output, &db),
    }
}

fn run_list(
    faction: Option<String>,
    batch: Option<String>,
    honorary: bool,
    db: &str,
    format: &str,
) -> Result<()> {
    let store = AssetStore::open(db).map_err(|e| anyhow::anyhow!("{}", e))?;
    let filter = RecordFilter {
        faction,
        batch,
        honorary_only: honorary,
    };
    let records = store.list(&filter).map_err(|e| anyhow::anyhow!("{}", e))?;

    if records.is_empty() {
        println!("No vehicles found.");
        return Ok(());
    }

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{} vehicle(s):\n", records.len());
    for record in &records {
        println!("  {} - {}", record.image_id, record.variant);
        println!(
            "    faction: {}  archetype: {}  biome: {}",
            record.faction, record.archetype, record.biome
        );
        println!("    style: {}  batch: {}", record.style, record.batch);
        if let Some(honoree) = &record.honorary {
            println!("    honorary: {}", honoree);
        }
        println!("    generated: {}", record.generation_date);
    }

    Ok(())
}

fn run_stats(by: &str, db: &str) -> Result<()> {
    let field = GroupField::parse(by).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown field '{}'. Use: faction, archetype, biome, style, batch",
            by
        )
    })?;

    let store = AssetStore::open(db).map_err(|e| anyhow::anyhow!("{}", e))?;
    let counts = store
        .aggregate_by(field)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if counts.is_empty() {
        println!("No vehicles found.");
        return Ok(());
    }

    let total: i64 = counts.iter().map(|(_, n)| n).sum();
    println!("Vehicles by {}:\n", by);
    for (value, count) in &counts {
        let percentage = (*count as f64 / total as f64) * 100.0;
        println!("  {:<24} {:>4} ({:5.1}%)", value, count, percentage);
    }
    println!("\n  Total: {}", total);

    Ok(())
}

fn run_export(output: &str, db: &str) -> Result<()> {
    let store = AssetStore::open(db).map_err(|e| anyhow::anyhow!("{}", e))?;
    let count = store
        .write_snapshot(output)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("Exported {} record(s) to {}", count, output);
    Ok(())
}
