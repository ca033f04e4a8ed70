//! Tiered royalty engine.
//!
//! A schedule is a banded rate table: the portion of a sales amount that
//! falls between two consecutive ceilings is rated at that band's percent,
//! and the final band is unbounded. Schedules are validated at
//! construction; computation never re-checks.

use crate::{
    error::{ValuationError, ValuationResult},
    projection::project_net_sales,
    store::ValuationStore,
    table::YearTable,
    types::{Region, ROW_ROYALTY, ROW_SALES},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoyaltyTier {
    /// Cumulative sales ceiling for this band. The last tier's ceiling is
    /// informational only — the final band is unbounded.
    pub upto_royalty: f64,
    /// Fractional rate in [0, 1].
    pub royalty_percent: f64,
}

#[derive(Debug, Clone, Default)]
pub struct RoyaltySchedule {
    tiers: Vec<RoyaltyTier>,
}

impl RoyaltySchedule {
    /// Validate and build a schedule. Ceilings must be finite, non-negative
    /// and strictly increasing; percents must lie in [0, 1].
    pub fn new(tiers: Vec<RoyaltyTier>) -> ValuationResult<Self> {
        for (i, tier) in tiers.iter().enumerate() {
            if !tier.upto_royalty.is_finite() || tier.upto_royalty < 0.0 {
                return Err(ValuationError::InvalidTierSchedule {
                    reason: format!("tier {i} ceiling {} must be finite and >= 0", tier.upto_royalty),
                });
            }
            if !tier.royalty_percent.is_finite() || !(0.0..=1.0).contains(&tier.royalty_percent) {
                return Err(ValuationError::InvalidTierSchedule {
                    reason: format!("tier {i} percent {} outside [0, 1]", tier.royalty_percent),
                });
            }
            if i > 0 && tier.upto_royalty <= tiers[i - 1].upto_royalty {
                return Err(ValuationError::InvalidTierSchedule {
                    reason: format!(
                        "tier ceilings must be strictly increasing ({} follows {})",
                        tier.upto_royalty,
                        tiers[i - 1].upto_royalty
                    ),
                });
            }
        }
        Ok(Self { tiers })
    }

    /// A schedule with no tiers; `royalty_on` is the identity.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Royalty owed on a single sales amount.
    ///
    /// Walks bands in order: each band below the amount contributes its
    /// full width at its rate, the band containing the amount contributes
    /// the remainder, and the unbounded final band rates everything above
    /// the second-to-last ceiling. A one-tier schedule is therefore a flat
    /// rate on the whole amount. An empty schedule returns the input
    /// unchanged.
    pub fn royalty_on(&self, sales: f64) -> f64 {
        if self.tiers.is_empty() {
            return sales;
        }
        let last = self.tiers.len() - 1;
        let mut royalty = 0.0;
        let mut prev_ceiling = 0.0;
        for (i, tier) in self.tiers.iter().enumerate() {
            if i == last {
                royalty += (sales - prev_ceiling) * tier.royalty_percent;
                break;
            }
            if sales <= tier.upto_royalty {
                royalty += (sales - prev_ceiling) * tier.royalty_percent;
                break;
            }
            royalty += (tier.upto_royalty - prev_ceiling) * tier.royalty_percent;
            prev_ceiling = tier.upto_royalty;
        }
        royalty
    }

    /// Apply the schedule cell-wise to every row whose label is in
    /// `labels`. One independent evaluation per present cell; absent cells
    /// stay absent, other rows are untouched.
    pub fn apply_to_rows(&self, table: &mut YearTable, labels: &[&str]) {
        table.map_rows_where(|label| labels.contains(&label), |v| self.royalty_on(v));
    }
}

/// The standalone royalty revenue view: net sales for the requested
/// regions with the asset's schedule applied to every cell. When
/// aggregated, the single output row is labeled "Royalty".
pub fn project_royalty_revenue(
    store: &ValuationStore,
    asset_name: &str,
    regions: &[Region],
    separated: bool,
) -> ValuationResult<YearTable> {
    let asset = store
        .find_asset_by_name(asset_name)?
        .ok_or_else(|| ValuationError::AssetNotFound {
            name: asset_name.to_string(),
        })?;
    let schedule = RoyaltySchedule::new(store.royalty_tiers(&asset.asset_id)?)?;

    let mut table = project_net_sales(store, asset_name, regions, separated)?;
    table.map_rows_where(|_| true, |v| schedule.royalty_on(v));
    if !separated {
        table.rename_row(ROW_SALES, ROW_ROYALTY);
    }
    Ok(table)
}
