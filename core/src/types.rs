//! Shared primitive types and domain records used across the pipeline.

use serde::{Deserialize, Serialize};

/// A calendar year column key.
pub type Year = i32;

/// A stable, store-generated identifier for a portfolio asset.
pub type AssetId = String;

// ── Row labels ─────────────────────────────────────────────────────

pub const ROW_SALES: &str = "Sales";
pub const ROW_ROYALTY: &str = "Royalty";
pub const ROW_DEVELOPMENT_MILESTONES: &str = "Development Milestones";
pub const ROW_SALES_MILESTONES: &str = "Sales Milestones";
pub const ROW_TOTAL_REVENUE: &str = "Total Revenue";
pub const ROW_NET_INCOME: &str = "Net Income";
pub const ROW_AFTER_TAX: &str = "After Tax";
pub const ROW_PRESENT_VALUE: &str = "Present Value";

/// A commercial region with its own unit pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Region {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "Europe")]
    Europe,
    #[serde(rename = "Rest of World")]
    RestOfWorld,
}

impl Region {
    /// The canonical region set the assembler always projects over.
    pub const CANONICAL: [Region; 3] = [Region::Us, Region::Europe, Region::RestOfWorld];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "US",
            Region::Europe => "Europe",
            Region::RestOfWorld => "Rest of World",
        }
    }

    pub fn parse(s: &str) -> Option<Region> {
        match s {
            "US" => Some(Region::Us),
            "Europe" => Some(Region::Europe),
            "Rest of World" => Some(Region::RestOfWorld),
            _ => None,
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A portfolio asset with per-unit, per-region pricing in whole currency
/// units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: AssetId,
    pub name: String,
    pub pricing_us: i64,
    pub pricing_eur: i64,
    pub pricing_row: i64,
}

impl Asset {
    pub fn unit_price(&self, region: Region) -> i64 {
        match region {
            Region::Us => self.pricing_us,
            Region::Europe => self.pricing_eur,
            Region::RestOfWorld => self.pricing_row,
        }
    }
}

/// One patient-schedule cell: projected patients for a single year.
/// The projector accumulates duplicate (region, year) rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub year: Year,
    pub patient_count: i64,
}

/// A one-time revenue injection at a fixed calendar year, independent of
/// sales performance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevelopmentMilestone {
    pub amount: f64,
    pub achievement_year: Year,
}

/// A one-time revenue injection unlocked the first year the selected
/// regions' sales reach `sales_exceeding`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesMilestone {
    pub sales_exceeding: f64,
    pub amount: f64,
}

/// Portfolio-wide financial parameters. All three are percentages
/// (20.0 means 20%). Exactly one record exists in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalParams {
    pub sales_margin: f64,
    pub tax_rate: f64,
    pub discount_rate: f64,
}
