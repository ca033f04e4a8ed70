//! valuation-runner: headless valuation pipeline runner.
//!
//! Usage:
//!   valuation-runner --db portfolio.db --asset Orvantis
//!   valuation-runner --regions US,Europe --base-year 2023
//!   valuation-runner --json

use anyhow::Result;
use valuation_core::{
    error::ValuationError,
    npv::{discounted_cash_flow, BASE_YEAR},
    projection::project_net_sales,
    render::{format_to_millions, render_npv_table, render_table, RenderedRow},
    revenue::assemble_and_snapshot,
    royalty::project_royalty_revenue,
    store::ValuationStore,
    types::{GlobalParams, Region, Year},
};
use std::env;
use std::str::FromStr;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let db = str_arg(&args, "--db").unwrap_or(":memory:");
    let base_year: Year = parse_arg(&args, "--base-year", BASE_YEAR);
    let json_mode = args.iter().any(|a| a == "--json");

    let store = ValuationStore::open(db)?;
    store.migrate()?;

    if store.list_assets()?.is_empty() {
        seed_demo(&store)?;
        log::info!("seeded demo portfolio into {db}");
    }

    let asset_name = match str_arg(&args, "--asset") {
        Some(name) => name.to_string(),
        None => match store.list_assets()?.first() {
            Some(asset) => asset.name.clone(),
            None => {
                println!("no assets in {db}; nothing to value");
                return Ok(());
            }
        },
    };

    let royalty_regions = match str_arg(&args, "--regions") {
        Some(list) => parse_regions(list)?,
        None => Region::CANONICAL.to_vec(),
    };

    let snapshot = match assemble_and_snapshot(&store, &asset_name, &royalty_regions) {
        Ok(snapshot) => snapshot,
        // A lookup miss is an empty dashboard, not a crash.
        Err(ValuationError::AssetNotFound { name }) => {
            log::warn!("asset '{name}' not found; nothing to display");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    println!("valuation-runner");
    println!("  db:              {db}");
    println!("  asset:           {asset_name}");
    println!(
        "  royalty regions: {}",
        royalty_regions
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("  base year:       {base_year}");
    println!();

    let net_sales = project_net_sales(&store, &asset_name, &Region::CANONICAL, true)?;
    print_table("NET SALES FORECASTS", &render_table(&net_sales));

    let royalty = project_royalty_revenue(&store, &asset_name, &royalty_regions, false)?;
    print_table("ROYALTY REVENUES", &render_table(&royalty));

    print_table("TOTAL REVENUE", &render_table(&snapshot.table));

    let params: GlobalParams = store.global_params()?;
    let analysis = discounted_cash_flow(&snapshot.table, &params, base_year)?;
    print_table("NET PRESENT VALUE", &render_npv_table(&analysis, &params));

    println!(
        "The asset's net present value is {}",
        format_to_millions(analysis.npv)
    );
    Ok(())
}

fn print_table(title: &str, rows: &[RenderedRow]) {
    println!("=== {title} ===");
    if rows.is_empty() {
        println!("  (empty)");
    }
    for row in rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .map(|(year, value)| format!("{year}: {value:>9}"))
            .collect();
        println!("  {:<24} {}", row.label, cells.join("  "));
    }
    println!();
}

fn parse_regions(list: &str) -> Result<Vec<Region>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| Region::parse(s).ok_or_else(|| anyhow::anyhow!("unknown region: {s}")))
        .collect()
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: FromStr>(args: &[String], flag: &str, default: T) -> T {
    str_arg(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// A small oncology portfolio so a fresh database produces output
/// immediately.
fn seed_demo(store: &ValuationStore) -> Result<()> {
    let asset_id = store.insert_asset("Orvantis", 1_400, 900, 500)?;

    for (year, count) in [(2025, 2_000), (2026, 5_000), (2027, 9_000)] {
        store.insert_patient_schedule(&asset_id, Region::Us, year, count)?;
    }
    for (year, count) in [(2026, 3_000), (2027, 6_000)] {
        store.insert_patient_schedule(&asset_id, Region::Europe, year, count)?;
    }
    for (year, count) in [(2027, 4_000), (2028, 8_000)] {
        store.insert_patient_schedule(&asset_id, Region::RestOfWorld, year, count)?;
    }

    store.insert_royalty_tier(&asset_id, 5_000_000.0, 0.05)?;
    store.insert_royalty_tier(&asset_id, 20_000_000.0, 0.08)?;
    store.insert_royalty_tier(&asset_id, 50_000_000.0, 0.12)?;

    store.insert_development_milestone(&asset_id, 2_000_000.0, 2024)?;
    store.insert_development_milestone(&asset_id, 5_000_000.0, 2026)?;

    store.insert_sales_milestone(&asset_id, 10_000_000.0, 3_000_000.0)?;
    store.insert_sales_milestone(&asset_id, 100_000_000.0, 8_000_000.0)?;

    store.set_global_params(&GlobalParams {
        sales_margin: 40.0,
        tax_rate: 21.0,
        discount_rate: 10.0,
    })?;
    Ok(())
}
