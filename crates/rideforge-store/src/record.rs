//! Asset records and their row mapping
//!
//! `AssetRecord` is the in-memory form with list-valued trait and tag
//! fields. Rows encode those lists as JSON text; the encoding happens only
//! at this boundary, never upstream in the generation pipeline.

use crate::schema::vehicles;
use diesel::prelude::*;
use rideforge_core::{ForgeError, Result};
use serde::{Deserialize, Serialize};

/// The durable description of one generated vehicle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Row id, assigned by the store on insert
    #[serde(default)]
    pub id: Option<i32>,
    /// Derived unique id, the record's natural key
    pub image_id: String,
    /// On-chain token id, populated by later workflows
    #[serde(default)]
    pub token_id: Option<i64>,
    pub vehicle_name: String,
    pub faction: String,
    pub archetype: String,
    pub variant: String,
    pub traits: Vec<String>,
    pub biome: String,
    pub style: String,
    pub camera_view: String,
    pub lighting: String,
    pub mood: String,
    #[serde(default)]
    pub honorary: Option<String>,
    pub creator: String,
    pub generation_date: String,
    pub source_prompt: String,
    pub tags: Vec<String>,
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub archive_id: Option<String>,
    #[serde(default)]
    pub archive_link: Option<String>,
    pub created_at: String,
    pub batch: String,
    pub content_hash: String,
    #[serde(default)]
    pub minted: bool,
    #[serde(default)]
    pub market_ready: bool,
}

/// Row as loaded from SQLite. Field order matches the table definition.
#[derive(Debug, Queryable)]
pub(crate) struct VehicleRow {
    pub id: i32,
    pub image_id: String,
    pub token_id: Option<i64>,
    pub vehicle_name: String,
    pub faction: String,
    pub archetype: String,
    pub variant: String,
    pub traits: String,
    pub biome: String,
    pub style: String,
    pub camera_view: String,
    pub lighting: String,
    pub mood: String,
    pub honorary: Option<String>,
    pub creator: String,
    pub generation_date: String,
    pub source_prompt: String,
    pub tags: String,
    pub file_name: String,
    pub file_path: String,
    pub archive_id: Option<String>,
    pub archive_link: Option<String>,
    pub created_at: String,
    pub batch: String,
    pub content_hash: String,
    pub minted: bool,
    pub market_ready: bool,
}

/// Insertable form; the row id comes from SQLite.
#[derive(Debug, Insertable)]
#[diesel(table_name = vehicles)]
pub(crate) struct NewVehicleRow {
    pub image_id: String,
    pub token_id: Option<i64>,
    pub vehicle_name: String,
    pub faction: String,
    pub archetype: String,
    pub variant: String,
    pub traits: String,
    pub biome: String,
    pub style: String,
    pub camera_view: String,
    pub lighting: String,
    pub mood: String,
    pub honorary: Option<String>,
    pub creator: String,
    pub generation_date: String,
    pub source_prompt: String,
    pub tags: String,
    pub file_name: String,
    pub file_path: String,
    pub archive_id: Option<String>,
    pub archive_link: Option<String>,
    pub created_at: String,
    pub batch: String,
    pub content_hash: String,
    pub minted: bool,
    pub market_ready: bool,
}

fn encode_list(list: &[String]) -> Result<String> {
    serde_json::to_string(list).map_err(|e| ForgeError::JsonError(e.to_string()))
}

fn decode_list(text: &str) -> Result<Vec<String>> {
    serde_json::from_str(text).map_err(|e| ForgeError::JsonError(e.to_string()))
}

impl NewVehicleRow {
    pub fn from_record(record: &AssetRecord) -> Result<Self> {
        Ok(Self {
            image_id: record.image_id.clone(),
            token_id: record.token_id,
            vehicle_name: record.vehicle_name.clone(),
            faction: record.faction.clone(),
            archetype: record.archetype.clone(),
            variant: record.variant.clone(),
            traits: encode_list(&record.traits)?,
            biome: record.biome.clone(),
            style: record.style.clone(),
            camera_view: record.camera_view.clone(),
            lighting: record.lighting.clone(),
            mood: record.mood.clone(),
            honorary: record.honorary.clone(),
            creator: record.creator.clone(),
            generation_date: record.generation_date.clone(),
            source_prompt: record.source_prompt.clone(),
            tags: encode_list(&record.tags)?,
            file_name: record.file_name.clone(),
            file_path: record.file_path.clone(),
            archive_id: record.archive_id.clone(),
            archive_link: record.archive_link.clone(),
            created_at: record.created_at.clone(),
            batch: record.batch.clone(),
            content_hash: record.content_hash.clone(),
            minted: record.minted,
            market_ready: record.market_ready,
        })
    }
}

impl VehicleRow {
    pub fn into_record(self) -> Result<AssetRecord> {
        Ok(AssetRecord {
            id: Some(self.id),
            image_id: self.image_id,
            token_id: self.token_id,
            vehicle_name: self.vehicle_name,
            faction: self.faction,
            archetype: self.archetype,
            variant: self.variant,
            traits: decode_list(&self.traits)?,
            biome: self.biome,
            style: self.style,
            camera_view: self.camera_view,
            lighting: self.lighting,
            mood: self.mood,
            honorary: self.honorary,
            creator: self.creator,
            generation_date: self.generation_date,
            source_prompt: self.source_prompt,
            tags: decode_list(&self.tags)?,
            file_name: self.file_name,
            file_path: self.file_path,
            archive_id: self.archive_id,
            archive_link: self.archive_link,
            created_at: self.created_at,
            batch: self.batch,
            content_hash: self.content_hash,
            minted: self.minted,
            market_ready: self.market_ready,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn sample_record(image_id: &str) -> AssetRecord {
        AssetRecord {
            id: None,
            image_id: image_id.to_string(),
            token_id: None,
            vehicle_name: "Viper Noble Speedster".to_string(),
            faction: "amalfi".to_string(),
            archetype: "speedster".to_string(),
            variant: "Viper Noble Speedster".to_string(),
            traits: vec!["racing_stance".to_string(), "gold_trim".to_string()],
            biome: "crystal".to_string(),
            style: "Noble Refined".to_string(),
            camera_view: "Side Profile".to_string(),
            lighting: "Bright studio lighting".to_string(),
            mood: "Dynamic racing spirit".to_string(),
            honorary: None,
            creator: "AI_Generator".to_string(),
            generation_date: "2026-08-06".to_string(),
            source_prompt: "a vehicle".to_string(),
            tags: vec!["amalfi".to_string(), "speedster".to_string()],
            file_name: format!("{}.png", image_id),
            file_path: format!("/tmp/{}.png", image_id),
            archive_id: None,
            archive_link: None,
            created_at: "2026-08-06T12:00:00Z".to_string(),
            batch: "Test_Batch".to_string(),
            content_hash: "sha256:00".to_string(),
            minted: false,
            market_ready: false,
        }
    }

    #[test]
    fn test_list_fields_roundtrip_through_rows() {
        let record = sample_record("amalfi_viper_noble_speedster_v01");
        let row = NewVehicleRow::from_record(&record).unwrap();
        assert_eq!(row.traits, r#"["racing_stance","gold_trim"]"#);

        let decoded = decode_list(&row.traits).unwrap();
        assert_eq!(decoded, record.traits);
    }

    #[test]
    fn test_decode_rejects_malformed_text() {
        assert!(decode_list("not json").is_err());
    }
}
