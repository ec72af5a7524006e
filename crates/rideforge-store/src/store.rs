//! SQLite-backed asset record store
//!
//! The connection sits behind a mutex so the uniqueness check and insert of
//! a record are serialized; the UNIQUE constraint on image_id makes a
//! colliding insert fail rather than overwrite.

use crate::record::{AssetRecord, NewVehicleRow, VehicleRow};
use crate::schema::vehicles;
use diesel::dsl::count_star;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::sqlite::SqliteConnection;
use rideforge_core::{time, ForgeError, Result};
use serde::Serialize;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

const BOOTSTRAP_SQL: &str = "\
CREATE TABLE IF NOT EXISTS vehicles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    image_id TEXT UNIQUE NOT NULL,
    token_id BIGINT,
    vehicle_name TEXT NOT NULL,
    faction TEXT NOT NULL,
    archetype TEXT NOT NULL,
    variant TEXT NOT NULL,
    traits TEXT NOT NULL,
    biome TEXT NOT NULL,
    style TEXT NOT NULL,
    camera_view TEXT NOT NULL,
    lighting TEXT NOT NULL,
    mood TEXT NOT NULL,
    honorary TEXT,
    creator TEXT NOT NULL DEFAULT 'AI_Generator',
    generation_date TEXT NOT NULL,
    source_prompt TEXT NOT NULL,
    tags TEXT NOT NULL,
    file_name TEXT NOT NULL,
    file_path TEXT NOT NULL,
    archive_id TEXT,
    archive_link TEXT,
    created_at TEXT NOT NULL,
    batch TEXT NOT NULL,
    content_hash TEXT NOT NULL,
    minted BOOLEAN NOT NULL DEFAULT 0,
    market_ready BOOLEAN NOT NULL DEFAULT 0
)";

/// Fields the reporting surface can aggregate over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupField {
    Faction,
    Archetype,
    Biome,
    Style,
    Batch,
}

impl GroupField {
    /// Parse a CLI-supplied field name
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "faction" => Some(GroupField::Faction),
            "archetype" => Some(GroupField::Archetype),
            "biome" => Some(GroupField::Biome),
            "style" => Some(GroupField::Style),
            "batch" => Some(GroupField::Batch),
            _ => None,
        }
    }
}

/// Optional narrowing for `list`
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    pub faction: Option<String>,
    pub batch: Option<String>,
    pub honorary_only: bool,
}

/// JSON snapshot wrapper written by `write_snapshot`
#[derive(Serialize)]
struct Snapshot<'a> {
    export_timestamp: String,
    total_records: usize,
    records: &'a [AssetRecord],
}

pub struct AssetStore {
    conn: Mutex<SqliteConnection>,
}

impl AssetStore {
    /// Open (or create) the store at the given path and ensure the schema
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let database_url = path.as_ref().to_string_lossy().to_string();
        let mut conn = SqliteConnection::establish(&database_url).map_err(|e| {
            ForgeError::StoreError(format!("failed to open {}: {}", database_url, e))
        })?;
        diesel::sql_query(BOOTSTRAP_SQL)
            .execute(&mut conn)
            .map_err(store_err)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, SqliteConnection>> {
        self.conn
            .lock()
            .map_err(|_| ForgeError::StoreError("store mutex poisoned".to_string()))
    }

    /// Insert one record, failing with `DuplicateKey` if its image id is
    /// already present. The prior record is left untouched on collision.
    pub fn insert(&self, record: &AssetRecord) -> Result<i32> {
        let row = NewVehicleRow::from_record(record)?;
        let mut conn = self.lock()?;

        diesel::insert_into(vehicles::table)
            .values(&row)
            .execute(&mut *conn)
            .map_err(|e| match e {
                DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                    ForgeError::DuplicateKey(record.image_id.clone())
                }
                other => ForgeError::StoreError(other.to_string()),
            })?;

        vehicles::table
            .filter(vehicles::image_id.eq(&record.image_id))
            .select(vehicles::id)
            .first::<i32>(&mut *conn)
            .map_err(store_err)
    }

    /// Whether a record with this image id exists
    pub fn contains(&self, image_id: &str) -> Result<bool> {
        let mut conn = self.lock()?;
        let n: i64 = vehicles::table
            .filter(vehicles::image_id.eq(image_id))
            .select(count_star())
            .first(&mut *conn)
            .map_err(store_err)?;
        Ok(n > 0)
    }

    /// Load one record by image id
    pub fn get(&self, image_id: &str) -> Result<Option<AssetRecord>> {
        let mut conn = self.lock()?;
        let row = vehicles::table
            .filter(vehicles::image_id.eq(image_id))
            .first::<VehicleRow>(&mut *conn)
            .optional()
            .map_err(store_err)?;
        row.map(VehicleRow::into_record).transpose()
    }

    /// List records, newest first
    pub fn list(&self, filter: &RecordFilter) -> Result<Vec<AssetRecord>> {
        let mut conn = self.lock()?;
        let mut query = vehicles::table.into_boxed();
        if let Some(faction) = &filter.faction {
            query = query.filter(vehicles::faction.eq(faction.clone()));
        }
        if let Some(batch) = &filter.batch {
            query = query.filter(vehicles::batch.eq(batch.clone()));
        }
        if filter.honorary_only {
            query = query.filter(vehicles::honorary.is_not_null());
        }
        let rows = query
            .order(vehicles::created_at.desc())
            .load::<VehicleRow>(&mut *conn)
            .map_err(store_err)?;
        rows.into_iter().map(VehicleRow::into_record).collect()
    }

    /// Count records grouped by one field, highest count first
    pub fn aggregate_by(&self, field: GroupField) -> Result<Vec<(String, i64)>> {
        let mut conn = self.lock()?;
        let mut counts: Vec<(String, i64)> = match field {
            GroupField::Faction => vehicles::table
                .group_by(vehicles::faction)
                .select((vehicles::faction, count_star()))
                .load(&mut *conn),
            GroupField::Archetype => vehicles::table
                .group_by(vehicles::archetype)
                .select((vehicles::archetype, count_star()))
                .load(&mut *conn),
            GroupField::Biome => vehicles::table
                .group_by(vehicles::biome)
                .select((vehicles::biome, count_star()))
                .load(&mut *conn),
            GroupField::Style => vehicles::table
                .group_by(vehicles::style)
                .select((vehicles::style, count_star()))
                .load(&mut *conn),
            GroupField::Batch => vehicles::table
                .group_by(vehicles::batch)
                .select((vehicles::batch, count_star()))
                .load(&mut *conn),
        }
        .map_err(store_err)?;
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        Ok(counts)
    }

    /// All records, newest first, with list fields decoded
    pub fn export_all(&self) -> Result<Vec<AssetRecord>> {
        self.list(&RecordFilter::default())
    }

    /// Write the full JSON snapshot and return the record count
    pub fn write_snapshot<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let records = self.export_all()?;
        let snapshot = Snapshot {
            export_timestamp: time::now_iso8601(),
            total_records: records.len(),
            records: &records,
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ForgeError::JsonError(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(records.len())
    }
}

fn store_err(e: DieselError) -> ForgeError {
    ForgeError::StoreError(e.to_string())
}
