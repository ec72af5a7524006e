//! Variant naming and image-id derivation
//!
//! Variant names read like "Leopard Noble Speedster": a totem word, a
//! style-flavored modifier, and the title-cased archetype. The image id is
//! the record's natural key and carries no salt — identical
//! (faction, variant) pairs collide on purpose, surfacing as a duplicate at
//! insert time. `disambiguate_id` is the explicit opt-in around that.

use crate::resolve::choose;
use rand::Rng;

const TOTEM_PATTERNS: &[&str] = &[
    "Leopard", "Tiger", "Dragon", "Phoenix", "Viper", "Wolf", "Eagle", "Shark",
];

const ID_VERSION: &str = "v01";

fn style_modifiers(style: &str) -> &'static [&'static str] {
    match style {
        "rough_cool_tattoo" => &["Tattoo", "Ink", "Rough", "Street"],
        "sleek_corporate" => &["Elite", "Prime", "Executive", "Corporate"],
        "brutalist_industrial" => &["Heavy", "Industrial", "Forge", "Steel"],
        "organic_bio" => &["Bio", "Living", "Symbiont", "Wild"],
        "mystical_ritual" => &["Ritual", "Mystic", "Sacred", "Ancient"],
        "noble_refined" => &["Noble", "Pristine", "Royal", "Refined"],
        _ => &["Custom"],
    }
}

/// Compose a variant name from the archetype and style keys
pub fn variant_name<R: Rng>(archetype: &str, style: &str, rng: &mut R) -> String {
    let pattern = choose(TOTEM_PATTERNS, rng);
    let modifier = choose(style_modifiers(style), rng);
    format!("{} {} {}", pattern, modifier, title_case(archetype))
}

/// Derive the unique image id for a (faction, variant) pair.
///
/// Pure: the same pair always yields the same id.
pub fn image_id(faction: &str, variant: &str) -> String {
    let safe_variant = slug(variant);
    if faction == crate::catalog::HONORARY_FACTION {
        format!("honorary_{}_{}", safe_variant, ID_VERSION)
    } else {
        format!("{}_{}_{}", slug(faction), safe_variant, ID_VERSION)
    }
}

/// Append a counter suffix until `taken` stops matching.
///
/// Opt-in only; the default naming scheme keeps the collision-prone id.
pub fn disambiguate_id<F>(base: &str, taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    if !taken(base) {
        return base.to_string();
    }
    let mut n = 2u32;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

/// Lowercase with runs of whitespace collapsed to single underscores
fn slug(s: &str) -> String {
    s.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Title-case each underscore- or space-separated word
pub fn title_case(s: &str) -> String {
    s.split(['_', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
