//! Batch generation
//!
//! Attempts are independent: each failure is reported and skipped, and the
//! run finishes with a success/failure tally instead of aborting.

use crate::pipeline::{Forge, ForgeOptions};
use crate::resolve::GenerationParams;
use rand::Rng;

/// Tally of one batch run
#[derive(Debug)]
pub struct BatchOutcome {
    pub requested: usize,
    pub generated: usize,
    pub failed: usize,
}

/// Run each request through the full pipeline, continuing past failures
pub fn run_batch<R: Rng>(
    forge: &Forge<'_>,
    requests: &[GenerationParams],
    opts: &ForgeOptions,
    rng: &mut R,
) -> BatchOutcome {
    println!(
        "Generating {} vehicle(s) for batch '{}'...",
        requests.len(),
        opts.batch
    );

    let mut generated = 0;
    let mut failed = 0;

    for params in requests {
        match forge.generate(params, opts, rng) {
            Ok(record) => {
                println!(
                    "  {} ({}) -> {}",
                    record.variant, record.faction, record.file_path
                );
                generated += 1;
            }
            Err(e) => {
                println!("  FAILED: {}", e);
                failed += 1;
            }
        }
    }

    println!(
        "\nBatch '{}': {}/{} generated, {} failed",
        opts.batch,
        generated,
        requests.len(),
        failed
    );

    BatchOutcome {
        requested: requests.len(),
        generated,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::providers::mock::MockProvider;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rideforge_store::AssetStore;
    use std::path::PathBuf;

    fn temp_dir() -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("rideforge_batch_test_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_batch_continues_past_failures() {
        let dir = temp_dir();
        let catalog = Catalog::builtin();
        let store = AssetStore::open(dir.join("assets.db")).unwrap();
        let forge = Forge::new(&catalog, Box::new(MockProvider::new()), None, &store);

        let requests = vec![
            GenerationParams {
                faction: Some("amalfi".to_string()),
                ..Default::default()
            },
            // Unknown faction: this attempt fails, the rest continue
            GenerationParams {
                faction: Some("nonexistent".to_string()),
                ..Default::default()
            },
            GenerationParams {
                faction: Some("raven_coats".to_string()),
                ..Default::default()
            },
        ];

        let opts = ForgeOptions {
            output_dir: dir.join("generated"),
            batch: "Mixed_Batch".to_string(),
            ..Default::default()
        };

        let mut rng = ChaCha8Rng::seed_from_u64(51);
        let outcome = run_batch(&forge, &requests, &opts, &mut rng);

        assert_eq!(outcome.requested, 3);
        assert_eq!(outcome.generated, 2);
        assert_eq!(outcome.failed, 1);

        std::fs::remove_dir_all(&dir).ok();
    }
}
