//! Static reference tables for the Rideforge collection
//!
//! Factions are data: loaded from a TOML file, with a minimal built-in
//! table as the fallback when the file is missing or malformed. Biomes,
//! vehicle archetypes, aesthetic styles, camera views, and lighting setups
//! are fixed tables compiled into the crate. The honorary faction is
//! synthesized in memory on every load so tribute vehicles work even when
//! the faction file does not mention it.

use rideforge_core::{ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Key of the synthesized tribute faction
pub const HONORARY_FACTION: &str = "honorary";

pub const CAMERA_VIEWS: &[&str] = &[
    "Front 3/4",
    "Side Profile",
    "Rear 3/4",
    "Top Down",
    "Close Detail",
];

pub const LIGHTING_SETUPS: &[&str] = &[
    "Moody purple-gray haze",
    "Bright studio lighting",
    "Dramatic sunset",
    "Neon night glow",
    "Soft natural light",
];

const VEHICLE_ARCHETYPES: &[(&str, &str)] = &[
    ("speedster", "ultra-fast single-seat racer with aerodynamic body"),
    ("bruiser", "heavy-duty multi-terrain assault vehicle"),
    ("glider", "hovering vehicle with anti-gravity propulsion"),
    ("phantom", "stealth vehicle with cloaking capabilities"),
    ("destroyer", "weapon-laden combat racer"),
    ("explorer", "long-range vehicle built for unknown territories"),
    ("buggy", "all-terrain off-road racing vehicle"),
];

const AESTHETIC_STYLES: &[(&str, &str)] = &[
    ("rough_cool_tattoo", "Rough Cool / Tattoo Aesthetic"),
    ("sleek_corporate", "Sleek Corporate"),
    ("brutalist_industrial", "Brutalist Industrial"),
    ("organic_bio", "Organic Bio-Tech"),
    ("mystical_ritual", "Mystical Ritual"),
    ("noble_refined", "Noble Refined"),
];

const BIOMES: &[(&str, &str)] = &[
    ("swamp", "Biogenic swamp environment with murky waters and twisted vegetation"),
    ("glacier", "Frozen glacier environment with ice formations and snow"),
    ("barrens", "Desolate barren landscape with rocky outcroppings"),
    ("molten", "Molten lava environment with fire and volcanic activity"),
    ("thornwood", "Dark thornwood forest with twisted spiky trees"),
    ("shards", "Crystalline shard environment with jagged crystal formations"),
    ("biolum", "Bioluminescent environment with glowing organic structures"),
    ("sands", "Desert sands environment with dunes and arid landscape"),
    ("ruins", "Ancient ruins environment with crumbling structures"),
    ("sulfuric_water", "Sulfuric water environment with toxic pools"),
    ("wastelands", "Post-apocalyptic wasteland with debris and decay"),
    ("mystic", "Mystical environment with magical energies and ethereal mists"),
    ("weldan", "Weldan metallic environment with industrial structures"),
    ("spiers", "Towering spiers environment with tall needle-like formations"),
    ("malva", "Malva environment with purple-hued alien landscapes"),
    ("crimson", "Crimson environment with red-tinted terrain and atmosphere"),
    ("jungle", "Dense jungle environment with lush tropical vegetation"),
    ("plague", "Plague-ridden environment with diseased and corrupted landscape"),
    ("bone", "Bone environment filled with skeletal remains and calcium structures"),
    ("crystal", "Pure crystal environment with transparent geometric formations"),
    ("sky", "Sky environment with floating platforms and aerial landscapes"),
    ("shadow", "Shadow environment with dark voids and minimal lighting"),
    ("mycelium", "Mycelium environment with fungal networks and spore clouds"),
    ("obsidian", "Obsidian environment with black volcanic glass formations"),
    ("silt", "Silt environment with fine sediment and muddy terrain"),
    ("glitter", "Glitter environment with sparkling, reflective surfaces"),
    ("botanical", "Botanical garden environment with diverse plant life"),
    ("acid", "Acid environment with corrosive pools and toxic atmosphere"),
    ("chaos", "Chaotic environment with reality-bending anomalies and instability"),
    // Tribute vehicles get their own twilight backdrop
    ("miami_swamp", "gray-purple Miami swamp with mist and soft twilight lighting"),
];

/// Descriptor for one faction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactionInfo {
    /// Archetype label, e.g. "Noble Planners"
    pub archetype: String,
    pub keywords: Vec<String>,
    pub materials: Vec<String>,
    /// One-line silhouette/style description
    pub style: String,
    #[serde(default)]
    pub aesthetic_influences: Vec<String>,
    pub vehicle_themes: Vec<String>,
    /// Sub-faction key to description, where the lore defines them
    #[serde(default)]
    pub subfactions: BTreeMap<String, String>,
}

/// TOML file wrapper
#[derive(Debug, Deserialize)]
struct FactionFile {
    factions: BTreeMap<String, FactionInfo>,
}

/// Immutable reference data, constructed once and passed by reference
/// into every component.
#[derive(Debug, Clone)]
pub struct Catalog {
    factions: BTreeMap<String, FactionInfo>,
    archetypes: BTreeMap<String, String>,
    biomes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
}

impl Catalog {
    /// Load the catalog with factions read from a TOML file.
    ///
    /// Never fails to the caller: on a read or parse error the built-in
    /// faction table is used instead and a warning goes to stderr.
    pub fn load(path: &Path) -> Self {
        let factions = match Self::load_factions(path) {
            Ok(factions) => factions,
            Err(e) => {
                eprintln!(
                    "Warning: could not load faction data from {}: {}. Using built-in table.",
                    path.display(),
                    e
                );
                builtin_factions()
            }
        };
        Self::assemble(factions)
    }

    /// Load the catalog from the default faction file locations
    pub fn discover() -> Self {
        let candidates = ["data/factions.toml", ".rideforge/factions.toml"];
        for candidate in &candidates {
            let path = Path::new(candidate);
            if path.exists() {
                return Self::load(path);
            }
        }
        Self::builtin()
    }

    /// Catalog backed entirely by the built-in tables
    pub fn builtin() -> Self {
        Self::assemble(builtin_factions())
    }

    fn load_factions(path: &Path) -> Result<BTreeMap<String, FactionInfo>> {
        let content = std::fs::read_to_string(path)?;
        let file: FactionFile = toml::from_str(&content)
            .map_err(|e| ForgeError::CatalogError(format!("bad faction file: {}", e)))?;
        if file.factions.is_empty() {
            return Err(ForgeError::CatalogError(
                "faction file contains no factions".to_string(),
            ));
        }
        Ok(file.factions)
    }

    fn assemble(mut factions: BTreeMap<String, FactionInfo>) -> Self {
        // The tribute faction is structurally special and always present,
        // whatever the faction file says.
        factions.insert(HONORARY_FACTION.to_string(), honorary_faction());

        Self {
            factions,
            archetypes: pairs_to_map(VEHICLE_ARCHETYPES),
            biomes: pairs_to_map(BIOMES),
            styles: pairs_to_map(AESTHETIC_STYLES),
        }
    }

    /// Sorted faction keys
    pub fn faction_keys(&self) -> Vec<&str> {
        self.factions.keys().map(String::as_str).collect()
    }

    pub fn archetype_keys(&self) -> Vec<&str> {
        self.archetypes.keys().map(String::as_str).collect()
    }

    pub fn biome_keys(&self) -> Vec<&str> {
        self.biomes.keys().map(String::as_str).collect()
    }

    pub fn style_keys(&self) -> Vec<&str> {
        self.styles.keys().map(String::as_str).collect()
    }

    /// Faction descriptor, or `UnknownCategoryKey`
    pub fn faction(&self, key: &str) -> Result<&FactionInfo> {
        self.factions
            .get(key)
            .ok_or_else(|| ForgeError::unknown_key("faction", key))
    }

    /// Archetype description, or `UnknownCategoryKey`
    pub fn archetype_desc(&self, key: &str) -> Result<&str> {
        self.archetypes
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ForgeError::unknown_key("archetype", key))
    }

    /// Biome description, or `UnknownCategoryKey`
    pub fn biome_desc(&self, key: &str) -> Result<&str> {
        self.biomes
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ForgeError::unknown_key("biome", key))
    }

    /// Style display name, or `UnknownCategoryKey`
    pub fn style_desc(&self, key: &str) -> Result<&str> {
        self.styles
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| ForgeError::unknown_key("style", key))
    }
}

fn pairs_to_map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn honorary_faction() -> FactionInfo {
    FactionInfo {
        archetype: "Tribute Vehicles".to_string(),
        keywords: string_vec(&["tribute", "legacy", "special", "commemorative", "unique"]),
        materials: string_vec(&[
            "custom themed bodywork",
            "signature patterns",
            "personalized details",
        ]),
        style: "varies by honoree".to_string(),
        aesthetic_influences: string_vec(&["personal style of honoree"]),
        vehicle_themes: string_vec(&[
            "custom tribute vehicles",
            "signature aesthetics",
            "legacy racers",
        ]),
        subfactions: BTreeMap::new(),
    }
}

fn builtin_factions() -> BTreeMap<String, FactionInfo> {
    let mut factions = BTreeMap::new();
    factions.insert(
        "amalfi".to_string(),
        FactionInfo {
            archetype: "Noble Planners".to_string(),
            keywords: string_vec(&[
                "luxury",
                "elegance",
                "long-term vision",
                "refinement",
                "high society",
            ]),
            materials: string_vec(&["crystalline bodywork", "gold trim", "pearl enamel"]),
            style: "streamlined and sculpted".to_string(),
            aesthetic_influences: string_vec(&[
                "The Culture",
                "Dune",
                "Blade Runner corporate elite",
            ]),
            vehicle_themes: string_vec(&[
                "regal racers",
                "hover-inspired tech",
                "precision over power",
            ]),
            subfactions: BTreeMap::new(),
        },
    );
    factions.insert(
        "raven_coats".to_string(),
        FactionInfo {
            archetype: "Stealth Tacticians".to_string(),
            keywords: string_vec(&["secrecy", "strategy", "trickery", "ambush", "deception"]),
            materials: string_vec(&[
                "matte black plating",
                "bioluminescent accents",
                "tactical armor",
            ]),
            style: "asymmetrical and agile".to_string(),
            aesthetic_influences: string_vec(&["Firefly", "rogue archetypes", "Deadfire"]),
            vehicle_themes: string_vec(&[
                "stealth buggies",
                "adaptive racers",
                "mist-cloaked muscle",
            ]),
            subfactions: BTreeMap::new(),
        },
    );
    factions
}

fn string_vec(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
