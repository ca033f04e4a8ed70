//! SQLite persistence layer.
//!
//! RULE: Only the store modules talk to the database.
//! Pipeline stages call store methods — they never execute SQL directly.

mod deal_terms;
mod params;
mod schedule;

use crate::{
    error::ValuationResult,
    types::{Asset, AssetId},
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct ValuationStore {
    conn: Connection,
    path: Option<String>, // None for :memory:, Some(path) for file
}

impl ValuationStore {
    pub fn open(path: &str) -> ValuationResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI,
        )?;
        // WAL mode only for real files (shared-memory and :memory: ignore it).
        let _ = conn.execute_batch("PRAGMA journal_mode=WAL;");
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self {
            conn,
            path: Some(path.to_string()),
        })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> ValuationResult<Self> {
        let conn = Connection::open(":memory:")?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn, path: None })
    }

    /// Reopen a new connection to the same database.
    /// For in-memory databases, this returns a new in-memory database
    /// (isolated). For file-based databases, this opens the same file.
    pub fn reopen(&self) -> ValuationResult<Self> {
        match &self.path {
            Some(p) => Self::open(p),
            None => Self::in_memory(),
        }
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> ValuationResult<()> {
        self.conn
            .execute_batch(include_str!("../../../migrations/001_foundation.sql"))?;
        Ok(())
    }

    // ── Assets ─────────────────────────────────────────────────────

    /// Insert an asset and return its generated id.
    pub fn insert_asset(
        &self,
        name: &str,
        pricing_us: i64,
        pricing_eur: i64,
        pricing_row: i64,
    ) -> ValuationResult<AssetId> {
        let asset_id = uuid::Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO asset (asset_id, name, pricing_us, pricing_eur, pricing_row)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![asset_id, name, pricing_us, pricing_eur, pricing_row],
        )?;
        Ok(asset_id)
    }

    pub fn find_asset_by_name(&self, name: &str) -> ValuationResult<Option<Asset>> {
        let asset = self
            .conn
            .query_row(
                "SELECT asset_id, name, pricing_us, pricing_eur, pricing_row
                 FROM asset WHERE name = ?1",
                params![name],
                |row| {
                    Ok(Asset {
                        asset_id: row.get(0)?,
                        name: row.get(1)?,
                        pricing_us: row.get(2)?,
                        pricing_eur: row.get(3)?,
                        pricing_row: row.get(4)?,
                    })
                },
            )
            .optional()?;
        Ok(asset)
    }

    /// All assets, ordered by name (the selector's option list).
    pub fn list_assets(&self) -> ValuationResult<Vec<Asset>> {
        let mut stmt = self.conn.prepare(
            "SELECT asset_id, name, pricing_us, pricing_eur, pricing_row
             FROM asset ORDER BY name ASC",
        )?;
        let assets = stmt
            .query_map([], |row| {
                Ok(Asset {
                    asset_id: row.get(0)?,
                    name: row.get(1)?,
                    pricing_us: row.get(2)?,
                    pricing_eur: row.get(3)?,
                    pricing_row: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(assets)
    }

    // ── Revenue snapshots ──────────────────────────────────────────

    pub fn save_revenue_snapshot(&self, asset_id: &str, state_json: &str) -> ValuationResult<()> {
        self.conn.execute(
            "INSERT INTO revenue_snapshot (asset_id, created_at, state_json)
             VALUES (?1, ?2, ?3)",
            params![asset_id, chrono::Utc::now().to_rfc3339(), state_json],
        )?;
        Ok(())
    }

    pub fn latest_revenue_snapshot(&self, asset_id: &str) -> ValuationResult<Option<String>> {
        let json = self
            .conn
            .query_row(
                "SELECT state_json FROM revenue_snapshot
                 WHERE asset_id = ?1
                 ORDER BY id DESC LIMIT 1",
                params![asset_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(json)
    }
}
