//! Revenue assembler — consolidates sales, royalties, and milestones into
//! one table with a recomputed "Total Revenue" row.
//!
//! Milestone triggers are judged on raw sales, before any royalty
//! adjustment, and over the sales years only — development milestones may
//! introduce new year columns afterwards.

use crate::{
    error::{ValuationError, ValuationResult},
    projection::project_net_sales,
    royalty::RoyaltySchedule,
    store::ValuationStore,
    table::YearTable,
    types::{
        Region, ROW_DEVELOPMENT_MILESTONES, ROW_SALES_MILESTONES, ROW_TOTAL_REVENUE,
    },
};
use serde::{Deserialize, Serialize};

/// The assembled revenue table plus the inputs that shaped it, in the
/// form handed to the NPV calculator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSnapshot {
    pub asset_name: String,
    pub royalty_regions: Vec<Region>,
    pub table: YearTable,
}

impl RevenueSnapshot {
    pub fn to_json(&self) -> ValuationResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> ValuationResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub fn assemble_total_revenue(
    store: &ValuationStore,
    asset_name: &str,
    royalty_regions: &[Region],
) -> ValuationResult<YearTable> {
    let asset = store
        .find_asset_by_name(asset_name)?
        .ok_or_else(|| ValuationError::AssetNotFound {
            name: asset_name.to_string(),
        })?;

    // Full separated sales table over the canonical regions.
    let mut table = project_net_sales(store, asset_name, &Region::CANONICAL, true)?;
    let sales_years = table.years();
    let selected: Vec<&str> = royalty_regions.iter().map(|r| r.as_str()).collect();

    // Sales milestones: first year whose column total over the selected
    // regions reaches the threshold. Raw sales, ascending year scan.
    for milestone in store.sales_milestones(&asset.asset_id)? {
        let fired = sales_years.iter().copied().find(|year| {
            let year_total: f64 = table
                .rows()
                .iter()
                .filter(|row| selected.contains(&row.label.as_str()))
                .filter_map(|row| row.cells.get(year))
                .sum();
            year_total >= milestone.sales_exceeding
        });
        match fired {
            Some(year) => {
                table.add(ROW_SALES_MILESTONES, year, milestone.amount);
                log::debug!(
                    "sales milestone {:.0} reached in {year} for '{asset_name}'",
                    milestone.sales_exceeding
                );
            }
            None => log::debug!(
                "sales milestone {:.0} never reached for '{asset_name}'",
                milestone.sales_exceeding
            ),
        }
    }

    // Development milestones are calendar-fixed; they may create new year
    // columns.
    for milestone in store.development_milestones(&asset.asset_id)? {
        table.add(
            ROW_DEVELOPMENT_MILESTONES,
            milestone.achievement_year,
            milestone.amount,
        );
    }

    // Royalty adjustment replaces raw sales in the selected regions only.
    let schedule = RoyaltySchedule::new(store.royalty_tiers(&asset.asset_id)?)?;
    schedule.apply_to_rows(&mut table, &selected);

    // Total row is recomputed from whatever rows are present, never cached.
    let totals = table.column_totals();
    table.push_row(ROW_TOTAL_REVENUE, totals);

    log::info!(
        "assembled revenue for '{asset_name}': {} rows x {} years, royalties on [{}]",
        table.rows().len(),
        table.years().len(),
        selected.join(", ")
    );
    Ok(table)
}

/// Assemble, wrap into a snapshot, and persist it for downstream
/// consumers. Returns the snapshot.
pub fn assemble_and_snapshot(
    store: &ValuationStore,
    asset_name: &str,
    royalty_regions: &[Region],
) -> ValuationResult<RevenueSnapshot> {
    let asset = store
        .find_asset_by_name(asset_name)?
        .ok_or_else(|| ValuationError::AssetNotFound {
            name: asset_name.to_string(),
        })?;
    let table = assemble_total_revenue(store, asset_name, royalty_regions)?;
    let snapshot = RevenueSnapshot {
        asset_name: asset_name.to_string(),
        royalty_regions: royalty_regions.to_vec(),
        table,
    };
    store.save_revenue_snapshot(&asset.asset_id, &snapshot.to_json()?)?;
    Ok(snapshot)
}
