//! Trait and tag derivation
//!
//! Traits describe visual features of the vehicle; tags are flat search
//! labels. Caller-supplied extras are appended verbatim and duplicates are
//! kept — `dedupe_traits` is a documented opt-in, not default behavior.

/// Visual traits every vehicle carries
pub const UNIVERSAL_TRAITS: &[&str] = &[
    "dual_headlight_eyes",
    "grill_smirk",
    "racing_stance",
    "faction_insignia",
];

/// Fixed collection tag attached to every record
pub const COLLECTION_TAG: &str = "rideforge";

const TATTOO_TRAITS: &[&str] = &["tattoo_body_art", "ink_patterns", "street_aesthetic"];
const CORPORATE_TRAITS: &[&str] = &["sleek_panels", "chrome_accents", "led_strips"];
const INDUSTRIAL_TRAITS: &[&str] = &["riveted_armor", "exposed_mechanics", "rust_weathering"];

/// Derive the trait list for a style key plus caller extras.
///
/// Style bundles apply by substring match, so a hybrid style key can pick
/// up more than one bundle.
pub fn derive_traits(style: &str, extras: &[String]) -> Vec<String> {
    let mut traits: Vec<String> = UNIVERSAL_TRAITS.iter().map(|s| s.to_string()).collect();

    if style.contains("tattoo") {
        traits.extend(TATTOO_TRAITS.iter().map(|s| s.to_string()));
    }
    if style.contains("corporate") {
        traits.extend(CORPORATE_TRAITS.iter().map(|s| s.to_string()));
    }
    if style.contains("industrial") {
        traits.extend(INDUSTRIAL_TRAITS.iter().map(|s| s.to_string()));
    }

    traits.extend(extras.iter().cloned());
    traits
}

/// Drop repeated traits, keeping first occurrences in order.
pub fn dedupe_traits(traits: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::BTreeSet::new();
    traits.into_iter().filter(|t| seen.insert(t.clone())).collect()
}

/// Derive the tag list for a record
pub fn derive_tags(
    faction: &str,
    archetype: &str,
    biome: &str,
    honoree: Option<&str>,
) -> Vec<String> {
    let mut tags = vec![
        faction.to_string(),
        archetype.to_string(),
        // Literal concatenation, not title-cased: "miami_swamp" -> "miamiswamp"
        biome.replace('_', ""),
        COLLECTION_TAG.to_string(),
    ];

    if let Some(honoree) = honoree {
        tags.push("honorary".to_string());
        tags.push(honoree_tag(honoree));
    }

    tags
}

/// Lowercased honoree with any parenthetical organization suffix stripped
fn honoree_tag(honoree: &str) -> String {
    honoree
        .to_lowercase()
        .split('(')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_universal_traits_always_present() {
        let traits = derive_traits("noble_refined", &[]);
        for t in UNIVERSAL_TRAITS {
            assert!(traits.contains(&t.to_string()));
        }
    }

    #[test]
    fn test_style_bundles_by_substring() {
        let traits = derive_traits("rough_cool_tattoo", &[]);
        assert!(traits.contains(&"tattoo_body_art".to_string()));
        assert!(!traits.contains(&"sleek_panels".to_string()));

        let traits = derive_traits("sleek_corporate", &[]);
        assert!(traits.contains(&"chrome_accents".to_string()));

        // A hybrid style key picks up every matching bundle
        let traits = derive_traits("corporate_industrial_fusion", &[]);
        assert!(traits.contains(&"led_strips".to_string()));
        assert!(traits.contains(&"riveted_armor".to_string()));
    }

    #[test]
    fn test_extras_are_monotonic_and_kept_verbatim() {
        let extras = strings(&["leopard_skin_pattern", "grill_smirk"]);
        let traits = derive_traits("noble_refined", &extras);

        for extra in &extras {
            assert!(traits.contains(extra));
        }
        // No default de-duplication: grill_smirk appears twice
        assert_eq!(traits.iter().filter(|t| *t == "grill_smirk").count(), 2);
    }

    #[test]
    fn test_dedupe_is_opt_in_and_order_preserving() {
        let traits = dedupe_traits(strings(&["a", "b", "a", "c", "b"]));
        assert_eq!(traits, strings(&["a", "b", "c"]));
    }

    #[test]
    fn test_tags_basic() {
        let tags = derive_tags("amalfi", "speedster", "miami_swamp", None);
        assert_eq!(
            tags,
            strings(&["amalfi", "speedster", "miamiswamp", COLLECTION_TAG])
        );
    }

    #[test]
    fn test_tags_with_honoree() {
        let tags = derive_tags("honorary", "buggy", "miami_swamp", Some("Satoshi (Bitcoin)"));
        assert!(tags.contains(&"honorary".to_string()));
        assert!(tags.contains(&"satoshi".to_string()));
        assert!(!tags.iter().any(|t| t.contains("bitcoin")));
    }
}
