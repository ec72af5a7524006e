//! Prompt composition for the image generation service
//!
//! Two templates: a tribute template when the honorary faction carries an
//! honoree, and the standard faction template otherwise. The only random
//! input is the faction theme draw, which goes through the injected random
//! source so composed prompts are reproducible under a fixed seed.

use crate::catalog::{Catalog, HONORARY_FACTION};
use crate::naming::title_case;
use crate::resolve::ResolvedParams;
use rand::Rng;
use rideforge_core::Result;

/// Compose the full generation prompt for a resolved parameter set
pub fn compose<R: Rng>(
    resolved: &ResolvedParams,
    variant: &str,
    catalog: &Catalog,
    rng: &mut R,
) -> Result<String> {
    let faction = catalog.faction(&resolved.faction)?;
    let archetype_desc = catalog.archetype_desc(&resolved.archetype)?;
    let biome_desc = catalog.biome_desc(&resolved.biome)?;
    let style_desc = catalog.style_desc(&resolved.style)?;

    let prompt = match &resolved.honoree {
        Some(honoree) if resolved.faction == HONORARY_FACTION => format!(
            "A tribute vehicle honoring {honoree}, designed as a {archetype_desc} with {style_desc}.\n\
             \n\
             VEHICLE: {variant}\n\
             STYLE: {style_desc}\n\
             BIOME: {biome_desc}\n\
             CAMERA: {camera}\n\
             LIGHTING: {lighting}\n\
             \n\
             Key design elements:\n\
             - Custom themed bodywork honoring {honoree}\n\
             - Signature aesthetic elements and patterns\n\
             - High-quality vehicle concept art\n\
             - Professional racing vehicle design\n\
             - Dynamic pose in {biome_desc}\n\
             - Clean background suitable for collection showcase\n\
             \n\
             Art style: Detailed digital concept art, 4K resolution,\n\
             professional game asset quality, clean composition",
            honoree = honoree,
            archetype_desc = archetype_desc,
            style_desc = style_desc,
            variant = variant,
            biome_desc = biome_desc,
            camera = resolved.camera_view,
            lighting = resolved.lighting,
        ),
        _ => {
            let keywords = faction.keywords.join(", ");
            let materials = faction.materials.join(", ");
            let theme = if faction.vehicle_themes.is_empty() {
                "signature faction".to_string()
            } else {
                faction.vehicle_themes[rng.gen_range(0..faction.vehicle_themes.len())].clone()
            };

            format!(
                "A {style_desc} {archetype_desc} from the {faction_name} faction.\n\
                 \n\
                 VEHICLE: {variant}\n\
                 FACTION: {faction_archetype} - {keywords}\n\
                 MATERIALS: {materials}\n\
                 STYLE: {faction_style}, {style_desc}\n\
                 BIOME: {biome_desc}\n\
                 CAMERA: {camera}\n\
                 LIGHTING: {lighting}\n\
                 \n\
                 Key design elements:\n\
                 - Built with {materials}\n\
                 - Embodies {faction_archetype} philosophy\n\
                 - {theme} aesthetic\n\
                 - Racing through {biome_desc}\n\
                 - Professional concept art quality\n\
                 \n\
                 Art style: High-quality digital concept art, detailed vehicle design,\n\
                 clean background perfect for collection showcase, 4K resolution",
                style_desc = style_desc,
                archetype_desc = archetype_desc,
                faction_name = title_case(&resolved.faction),
                variant = variant,
                faction_archetype = faction.archetype,
                keywords = keywords,
                materials = materials,
                faction_style = faction.style,
                biome_desc = biome_desc,
                camera = resolved.camera_view,
                lighting = resolved.lighting,
                theme = theme,
            )
        }
    };

    Ok(prompt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn resolved(faction: &str, honoree: Option<&str>) -> ResolvedParams {
        ResolvedParams {
            faction: faction.to_string(),
            archetype: "speedster".to_string(),
            biome: "crystal".to_string(),
            style: "noble_refined".to_string(),
            camera_view: "Side Profile".to_string(),
            lighting: "Bright studio lighting".to_string(),
            honoree: honoree.map(String::from),
            variant_override: None,
            extra_traits: vec![],
        }
    }

    #[test]
    fn test_standard_template_includes_faction_and_biome_text() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let prompt = compose(
            &resolved("amalfi", None),
            "Viper Noble Speedster",
            &catalog,
            &mut rng,
        )
        .unwrap();

        assert!(prompt.contains("Noble Planners"));
        assert!(prompt.contains("Pure crystal environment with transparent geometric formations"));
        assert!(prompt.contains("VEHICLE: Viper Noble Speedster"));
        assert!(prompt.contains("the Amalfi faction"));
        assert!(prompt.contains("crystalline bodywork"));
        assert!(prompt.contains("CAMERA: Side Profile"));
    }

    #[test]
    fn test_honorary_template_used_with_honoree() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let prompt = compose(
            &resolved("honorary", Some("Satoshi (Bitcoin)")),
            "Satoshi Tribute Vehicle",
            &catalog,
            &mut rng,
        )
        .unwrap();

        assert!(prompt.contains("tribute vehicle honoring Satoshi (Bitcoin)"));
        assert!(prompt.contains("VEHICLE: Satoshi Tribute Vehicle"));
        assert!(!prompt.contains("philosophy"));
    }

    #[test]
    fn test_honorary_faction_without_honoree_uses_standard_template() {
        let catalog = Catalog::builtin();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        let prompt = compose(
            &resolved("honorary", None),
            "Wolf Custom Speedster",
            &catalog,
            &mut rng,
        )
        .unwrap();

        assert!(prompt.contains("Tribute Vehicles"));
        assert!(prompt.contains("philosophy"));
    }

    #[test]
    fn test_prompt_reproducible_with_same_seed() {
        let catalog = Catalog::builtin();
        let mut a = ChaCha8Rng::seed_from_u64(77);
        let mut b = ChaCha8Rng::seed_from_u64(77);

        let first = compose(&resolved("amalfi", None), "Viper Noble Speedster", &catalog, &mut a)
            .unwrap();
        let second = compose(&resolved("amalfi", None), "Viper Noble Speedster", &catalog, &mut b)
            .unwrap();
        assert_eq!(first, second);
    }
}
