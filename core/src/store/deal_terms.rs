//! Deal terms: royalty tiers and milestone definitions.

use super::ValuationStore;
use crate::{
    error::ValuationResult,
    royalty::RoyaltyTier,
    types::{DevelopmentMilestone, SalesMilestone, Year},
};
use rusqlite::params;

impl ValuationStore {
    pub fn insert_royalty_tier(
        &self,
        asset_id: &str,
        upto_royalty: f64,
        royalty_percent: f64,
    ) -> ValuationResult<()> {
        self.conn.execute(
            "INSERT INTO royalty_tier (asset_id, upto_royalty, royalty_percent)
             VALUES (?1, ?2, ?3)",
            params![asset_id, upto_royalty, royalty_percent],
        )?;
        Ok(())
    }

    /// Royalty tiers ordered by ceiling ascending. Schedule construction
    /// still validates monotonicity; the ordering here is not a substitute.
    pub fn royalty_tiers(&self, asset_id: &str) -> ValuationResult<Vec<RoyaltyTier>> {
        let mut stmt = self.conn.prepare(
            "SELECT upto_royalty, royalty_percent FROM royalty_tier
             WHERE asset_id = ?1
             ORDER BY upto_royalty ASC",
        )?;
        let tiers = stmt
            .query_map(params![asset_id], |row| {
                Ok(RoyaltyTier {
                    upto_royalty: row.get(0)?,
                    royalty_percent: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tiers)
    }

    pub fn insert_development_milestone(
        &self,
        asset_id: &str,
        amount: f64,
        achievement_year: Year,
    ) -> ValuationResult<()> {
        self.conn.execute(
            "INSERT INTO development_milestone (asset_id, amount, achievement_year)
             VALUES (?1, ?2, ?3)",
            params![asset_id, amount, achievement_year],
        )?;
        Ok(())
    }

    pub fn development_milestones(
        &self,
        asset_id: &str,
    ) -> ValuationResult<Vec<DevelopmentMilestone>> {
        let mut stmt = self.conn.prepare(
            "SELECT amount, achievement_year FROM development_milestone
             WHERE asset_id = ?1
             ORDER BY achievement_year ASC",
        )?;
        let milestones = stmt
            .query_map(params![asset_id], |row| {
                Ok(DevelopmentMilestone {
                    amount: row.get(0)?,
                    achievement_year: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(milestones)
    }

    pub fn insert_sales_milestone(
        &self,
        asset_id: &str,
        sales_exceeding: f64,
        amount: f64,
    ) -> ValuationResult<()> {
        self.conn.execute(
            "INSERT INTO sales_milestone (asset_id, sales_exceeding, amount)
             VALUES (?1, ?2, ?3)",
            params![asset_id, sales_exceeding, amount],
        )?;
        Ok(())
    }

    pub fn sales_milestones(&self, asset_id: &str) -> ValuationResult<Vec<SalesMilestone>> {
        let mut stmt = self.conn.prepare(
            "SELECT sales_exceeding, amount FROM sales_milestone
             WHERE asset_id = ?1
             ORDER BY sales_exceeding ASC",
        )?;
        let milestones = stmt
            .query_map(params![asset_id], |row| {
                Ok(SalesMilestone {
                    sales_exceeding: row.get(0)?,
                    amount: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(milestones)
    }
}
