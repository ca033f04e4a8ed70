//! Net-present-value calculator over an assembled revenue table.
//!
//! Margin and tax are applied to the "Total Revenue" row, and each year's
//! after-tax figure is discounted back to the base year. Years before the
//! base year have negative periods and inflate instead of discounting —
//! standard time-value-of-money, not an error.

use crate::{
    error::{ValuationError, ValuationResult},
    table::YearTable,
    types::{
        GlobalParams, Year, ROW_AFTER_TAX, ROW_NET_INCOME, ROW_PRESENT_VALUE, ROW_TOTAL_REVENUE,
    },
};
use std::collections::BTreeMap;

/// Default anchor year for discounting.
pub const BASE_YEAR: Year = 2023;

#[derive(Debug, Clone, PartialEq)]
pub struct NpvAnalysis {
    /// Total Revenue, Net Income, After Tax, and Present Value rows over
    /// the input table's year columns.
    pub table: YearTable,
    /// Sum of present values across all years.
    pub npv: f64,
}

pub fn discounted_cash_flow(
    revenue: &YearTable,
    params: &GlobalParams,
    base_year: Year,
) -> ValuationResult<NpvAnalysis> {
    if params.discount_rate <= -100.0 {
        return Err(ValuationError::ArithmeticDomain {
            rate: params.discount_rate,
        });
    }

    // Prefer the assembled total; recompute it if the caller handed a
    // table without one.
    let totals = match revenue.row(ROW_TOTAL_REVENUE) {
        Some(row) => row.cells.clone(),
        None => revenue.column_totals(),
    };

    let discount_base = 1.0 + params.discount_rate / 100.0;
    let mut total_row = BTreeMap::new();
    let mut net_income_row = BTreeMap::new();
    let mut after_tax_row = BTreeMap::new();
    let mut present_value_row = BTreeMap::new();
    let mut npv = 0.0;

    for year in revenue.years() {
        let total = totals.get(&year).copied().unwrap_or(0.0);
        let net_income = total * params.sales_margin / 100.0;
        let after_tax = net_income * (1.0 - params.tax_rate / 100.0);
        let periods = year - base_year;
        let present_value = after_tax / discount_base.powi(periods);

        total_row.insert(year, total);
        net_income_row.insert(year, net_income);
        after_tax_row.insert(year, after_tax);
        present_value_row.insert(year, present_value);
        npv += present_value;
    }

    let mut table = YearTable::new();
    table.push_row(ROW_TOTAL_REVENUE, total_row);
    table.push_row(ROW_NET_INCOME, net_income_row);
    table.push_row(ROW_AFTER_TAX, after_tax_row);
    table.push_row(ROW_PRESENT_VALUE, present_value_row);

    log::info!("NPV against base year {base_year}: {npv:.2}");
    Ok(NpvAnalysis { table, npv })
}
