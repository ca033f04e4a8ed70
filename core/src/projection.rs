//! Sales projector — patient schedules × unit pricing → net sales.
//!
//! Output years are exactly the union of years present in the source
//! schedules for the requested regions; no year is fabricated. Separated
//! output keeps one row per region in the caller's order; aggregated
//! output sums across regions into a single "Sales" row.

use crate::{
    error::{ValuationError, ValuationResult},
    store::ValuationStore,
    table::YearTable,
    types::{Asset, Region, Year, ROW_SALES},
};
use std::collections::BTreeMap;

pub fn project_net_sales(
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

    let mut table = YearTable::new();
    if separated {
        for &region in regions {
            table.push_row(region.as_str(), region_sales(store, &asset, region)?);
        }
    } else if !regions.is_empty() {
        let mut combined: BTreeMap<Year, f64> = BTreeMap::new();
        for &region in regions {
            for (year, amount) in region_sales(store, &asset, region)? {
                *combined.entry(year).or_insert(0.0) += amount;
            }
        }
        table.push_row(ROW_SALES, combined);
    }

    log::debug!(
        "projected net sales for '{asset_name}': {} regions, {} years, separated={separated}",
        regions.len(),
        table.years().len()
    );
    Ok(table)
}

/// Yearly sales for one region: patient count × the region's unit price,
/// accumulated over all schedule rows.
fn region_sales(
    store: &ValuationStore,
    asset: &Asset,
    region: Region,
) -> ValuationResult<BTreeMap<Year, f64>> {
    let price = asset.unit_price(region);
    let mut sales_by_year: BTreeMap<Year, f64> = BTreeMap::new();
    for entry in store.patient_schedule(&asset.asset_id, region)? {
        *sales_by_year.entry(entry.year).or_insert(0.0) += entry.patient_count as f64 * price as f64;
    }
    Ok(sales_by_year)
}
