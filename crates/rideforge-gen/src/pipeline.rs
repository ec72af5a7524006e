//! End-to-end generation pipeline
//!
//! One call fully resolves parameters, derives the name and id, composes
//! the prompt, invokes the generation provider, writes the downloaded
//! bytes locally, persists the asset record, and uploads to the archive
//! when one is configured. A retry after any failure produces a fresh
//! resolution with fresh draws; nothing is mutated in place.

use crate::archive::ArchiveProvider;
use crate::catalog::{Catalog, HONORARY_FACTION};
use crate::naming;
use crate::prompt;
use crate::provider::{ImageProvider, ImageQuality, ImageSize};
use crate::resolve::{self, GenerationParams};
use crate::traits;
use rand::Rng;
use rideforge_core::{time, ContentHash, Result};
use rideforge_store::{AssetRecord, AssetStore};
use std::path::PathBuf;

/// Fixed mood string recorded on every vehicle
pub const DEFAULT_MOOD: &str = "Dynamic racing spirit";

/// Top-level archive folder for the collection
pub const ARCHIVE_ROOT_FOLDER: &str = "Rideforge_Collection";

const HONORARY_BATCH: &str = "Honorary_Collection";
const HONORARY_SUBFOLDER: &str = "Honoraries";
const HONORARY_DEFAULT_STYLE: &str = "rough_cool_tattoo";

/// Per-run settings for the pipeline
#[derive(Debug, Clone)]
pub struct ForgeOptions {
    /// Directory the downloaded images are written into
    pub output_dir: PathBuf,
    /// Batch label grouping the records of one logical run
    pub batch: String,
    pub creator: String,
    pub size: ImageSize,
    pub quality: ImageQuality,
    /// Opt-in counter-suffix id disambiguation; off preserves the
    /// collision-prone naming scheme
    pub disambiguate_ids: bool,
    /// Archive subfolder override; the batch label is used when unset
    pub archive_subfolder: Option<String>,
}

impl Default for ForgeOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(".rideforge/generated"),
            batch: "Adhoc".to_string(),
            creator: "AI_Generator".to_string(),
            size: ImageSize::default(),
            quality: ImageQuality::default(),
            disambiguate_ids: false,
            archive_subfolder: None,
        }
    }
}

/// The generation pipeline: catalog + provider + optional archive + store
pub struct Forge<'a> {
    catalog: &'a Catalog,
    provider: Box<dyn ImageProvider>,
    archive: Option<Box<dyn ArchiveProvider>>,
    store: &'a AssetStore,
}

impl<'a> Forge<'a> {
    pub fn new(
        catalog: &'a Catalog,
        provider: Box<dyn ImageProvider>,
        archive: Option<Box<dyn ArchiveProvider>>,
        store: &'a AssetStore,
    ) -> Self {
        Self {
            catalog,
            provider,
            archive,
            store,
        }
    }

    /// Run one full generation attempt and return the persisted record
    pub fn generate<R: Rng>(
        &self,
        params: &GenerationParams,
        opts: &ForgeOptions,
        rng: &mut R,
    ) -> Result<AssetRecord> {
        let resolved = resolve::resolve(params, self.catalog, rng)?;

        let variant = match &resolved.variant_override {
            Some(name) => name.clone(),
            None => naming::variant_name(&resolved.archetype, &resolved.style, rng),
        };

        let mut image_id = naming::image_id(&resolved.faction, &variant);
        if opts.disambiguate_ids {
            image_id = naming::disambiguate_id(&image_id, |candidate| {
                self.store.contains(candidate).unwrap_or(false)
            });
        }

        let source_prompt = prompt::compose(&resolved, &variant, self.catalog, rng)?;

        let image = self
            .provider
            .generate(&source_prompt, opts.size, opts.quality)?;
        let bytes = self.provider.fetch(&image)?;

        std::fs::create_dir_all(&opts.output_dir)?;
        let file_name = format!("{}.png", image_id);
        let local_path = opts.output_dir.join(&file_name);
        std::fs::write(&local_path, &bytes)?;

        let content_hash = ContentHash::from_bytes(&bytes).to_prefixed_hex();
        let trait_list = traits::derive_traits(&resolved.style, &resolved.extra_traits);
        let tags = traits::derive_tags(
            &resolved.faction,
            &resolved.archetype,
            &resolved.biome,
            resolved.honoree.as_deref(),
        );

        // Best-effort upload; a failure downgrades to local-only storage
        let archived = match &self.archive {
            Some(archive) => {
                let folders = self.archive_folders(opts);
                match archive.upload(&bytes, &file_name, &folders) {
                    Ok(object) => Some(object),
                    Err(e) => {
                        eprintln!(
                            "Warning: archive upload failed, keeping local copy only: {}",
                            e
                        );
                        None
                    }
                }
            }
            None => None,
        };

        let style_desc = self.catalog.style_desc(&resolved.style)?.to_string();
        let mut record = AssetRecord {
            id: None,
            image_id,
            token_id: None,
            vehicle_name: variant.clone(),
            faction: resolved.faction.clone(),
            archetype: resolved.archetype.clone(),
            variant,
            traits: trait_list,
            biome: resolved.biome.clone(),
            style: style_desc,
            camera_view: resolved.camera_view.clone(),
            lighting: resolved.lighting.clone(),
            mood: DEFAULT_MOOD.to_string(),
            honorary: resolved.honoree.clone(),
            creator: opts.creator.clone(),
            generation_date: time::today(),
            source_prompt,
            tags,
            file_name,
            file_path: local_path.to_string_lossy().to_string(),
            archive_id: archived.as_ref().map(|o| o.id.clone()),
            archive_link: archived.and_then(|o| o.link),
            created_at: time::now_iso8601(),
            batch: opts.batch.clone(),
            content_hash,
            minted: false,
            market_ready: false,
        };

        let row_id = self.store.insert(&record)?;
        record.id = Some(row_id);
        Ok(record)
    }

    /// Create a tribute vehicle for a named honoree
    pub fn honorary<R: Rng>(
        &self,
        honoree_name: &str,
        honoree_org: &str,
        style: Option<&str>,
        extra_traits: &[String],
        opts: &ForgeOptions,
        rng: &mut R,
    ) -> Result<AssetRecord> {
        let params = GenerationParams {
            faction: Some(HONORARY_FACTION.to_string()),
            archetype: Some("buggy".to_string()),
            biome: Some("miami_swamp".to_string()),
            style: Some(style.unwrap_or(HONORARY_DEFAULT_STYLE).to_string()),
            honoree: Some(format!("{} ({})", honoree_name, honoree_org)),
            variant: Some(format!("{} Tribute Vehicle", honoree_name)),
            extra_traits: extra_traits.to_vec(),
        };

        let honorary_opts = ForgeOptions {
            batch: HONORARY_BATCH.to_string(),
            archive_subfolder: Some(HONORARY_SUBFOLDER.to_string()),
            ..opts.clone()
        };

        self.generate(&params, &honorary_opts, rng)
    }

    fn archive_folders(&self, opts: &ForgeOptions) -> Vec<String> {
        let leaf = opts
            .archive_subfolder
            .clone()
            .unwrap_or_else(|| opts.batch.clone());
        vec![ARCHIVE_ROOT_FOLDER.to_string(), leaf]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::DirArchive;
    use crate::providers::mock::MockProvider;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use rideforge_store::RecordFilter;
    use std::path::Path;

    struct Fixture {
        dir: PathBuf,
        catalog: Catalog,
        store: AssetStore,
    }

    impl Fixture {
        fn new() -> Self {
            let dir = std::env::temp_dir()
                .join(format!("rideforge_pipeline_test_{}", uuid::Uuid::new_v4()));
            std::fs::create_dir_all(&dir).unwrap();
            let store = AssetStore::open(dir.join("assets.db")).unwrap();
            Self {
                dir,
                catalog: Catalog::builtin(),
                store,
            }
        }

        fn forge(&self, archive: Option<Box<dyn crate::archive::ArchiveProvider>>) -> Forge<'_> {
            Forge::new(
                &self.catalog,
                Box::new(MockProvider::new()),
                archive,
                &self.store,
            )
        }

        fn opts(&self) -> ForgeOptions {
            ForgeOptions {
                output_dir: self.dir.join("generated"),
                batch: "Test_Batch".to_string(),
                ..Default::default()
            }
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            std::fs::remove_dir_all(&self.dir).ok();
        }
    }

    #[test]
    fn test_pinned_generation_end_to_end() {
        let fx = Fixture::new();
        let forge = fx.forge(None);
        let mut rng = ChaCha8Rng::seed_from_u64(21);

        let params = GenerationParams {
            faction: Some("amalfi".to_string()),
            biome: Some("crystal".to_string()),
            style: Some("noble_refined".to_string()),
            archetype: Some("speedster".to_string()),
            ..Default::default()
        };

        let record = forge.generate(&params, &fx.opts(), &mut rng).unwrap();

        assert_eq!(record.faction, "amalfi");
        assert_eq!(record.biome, "crystal");
        assert_eq!(record.style, "Noble Refined");
        assert!(record
            .source_prompt
            .contains("Pure crystal environment with transparent geometric formations"));
        assert!(record.source_prompt.contains("Noble Planners"));
        assert!(record.content_hash.starts_with("sha256:"));
        assert!(Path::new(&record.file_path).exists());
        assert_eq!(record.mood, DEFAULT_MOOD);

        // Persisted, not just returned
        assert!(fx.store.contains(&record.image_id).unwrap());
    }

    #[test]
    fn test_honorary_end_to_end() {
        let fx = Fixture::new();
        let forge = fx.forge(None);
        let mut rng = ChaCha8Rng::seed_from_u64(22);

        let record = forge
            .honorary(
                "Satoshi",
                "Bitcoin",
                Some("sleek_corporate"),
                &["chrome_finish".to_string()],
                &fx.opts(),
                &mut rng,
            )
            .unwrap();

        assert!(record.image_id.starts_with("honorary_"));
        assert!(record.source_prompt.contains("tribute"));
        assert!(record.tags.contains(&"honorary".to_string()));
        assert!(record.tags.contains(&"satoshi".to_string()));
        assert!(record.traits.contains(&"chrome_finish".to_string()));
        assert_eq!(record.batch, "Honorary_Collection");
        assert_eq!(record.honorary.as_deref(), Some("Satoshi (Bitcoin)"));
    }

    #[test]
    fn test_unknown_key_persists_nothing() {
        let fx = Fixture::new();
        let forge = fx.forge(None);
        let mut rng = ChaCha8Rng::seed_from_u64(23);

        let params = GenerationParams {
            faction: Some("unheard_of".to_string()),
            ..Default::default()
        };

        assert!(forge.generate(&params, &fx.opts(), &mut rng).is_err());
        assert!(fx.store.list(&RecordFilter::default()).unwrap().is_empty());
    }

    #[test]
    fn test_duplicate_variant_collides() {
        let fx = Fixture::new();
        let forge = fx.forge(None);
        let mut rng = ChaCha8Rng::seed_from_u64(24);

        let params = GenerationParams {
            faction: Some("amalfi".to_string()),
            variant: Some("Viper Noble Speedster".to_string()),
            ..Default::default()
        };

        forge.generate(&params, &fx.opts(), &mut rng).unwrap();
        let err = forge.generate(&params, &fx.opts(), &mut rng).unwrap_err();
        assert!(matches!(err, rideforge_core::ForgeError::DuplicateKey(_)));
    }

    #[test]
    fn test_disambiguation_is_opt_in() {
        let fx = Fixture::new();
        let forge = fx.forge(None);
        let mut rng = ChaCha8Rng::seed_from_u64(25);

        let params = GenerationParams {
            faction: Some("amalfi".to_string()),
            variant: Some("Viper Noble Speedster".to_string()),
            ..Default::default()
        };

        let mut opts = fx.opts();
        opts.disambiguate_ids = true;

        let first = forge.generate(&params, &opts, &mut rng).unwrap();
        let second = forge.generate(&params, &opts, &mut rng).unwrap();

        assert_eq!(first.image_id, "amalfi_viper_noble_speedster_v01");
        assert_eq!(second.image_id, "amalfi_viper_noble_speedster_v01_2");
    }

    #[test]
    fn test_same_seed_reproduces_name_and_prompt() {
        let fx_a = Fixture::new();
        let fx_b = Fixture::new();
        let forge_a = fx_a.forge(None);
        let forge_b = fx_b.forge(None);

        let mut rng_a = ChaCha8Rng::seed_from_u64(404);
        let mut rng_b = ChaCha8Rng::seed_from_u64(404);

        let a = forge_a
            .generate(&GenerationParams::default(), &fx_a.opts(), &mut rng_a)
            .unwrap();
        let b = forge_b
            .generate(&GenerationParams::default(), &fx_b.opts(), &mut rng_b)
            .unwrap();

        assert_eq!(a.image_id, b.image_id);
        assert_eq!(a.variant, b.variant);
        assert_eq!(a.source_prompt, b.source_prompt);
    }

    #[test]
    fn test_different_seeds_produce_distinct_identities() {
        let catalog = Catalog::builtin();
        let mut ids = std::collections::BTreeSet::new();

        for seed in 0..6u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let resolved =
                resolve::resolve(&GenerationParams::default(), &catalog, &mut rng).unwrap();
            let variant = naming::variant_name(&resolved.archetype, &resolved.style, &mut rng);
            ids.insert(naming::image_id(&resolved.faction, &variant));

            assert!(catalog.faction(&resolved.faction).is_ok());
            assert!(catalog.biome_desc(&resolved.biome).is_ok());
        }

        assert!(ids.len() >= 2);
    }

    #[test]
    fn test_archive_object_recorded() {
        let fx = Fixture::new();
        let archive_root = fx.dir.join("archive");
        let forge = fx.forge(Some(Box::new(DirArchive::new(&archive_root))));
        let mut rng = ChaCha8Rng::seed_from_u64(31);

        let record = forge
            .generate(&GenerationParams::default(), &fx.opts(), &mut rng)
            .unwrap();

        let archive_id = record.archive_id.unwrap();
        assert!(archive_id.starts_with("Rideforge_Collection/Test_Batch/"));
        assert!(archive_root
            .join("Rideforge_Collection")
            .join("Test_Batch")
            .join(&record.file_name)
            .exists());
    }
}
