//! Presentation boundary — formatting only.
//!
//! Pipeline math always runs on full-precision values; nothing in here is
//! called from the other stages. Absent cells render as zero.

use crate::{
    npv::NpvAnalysis,
    table::YearTable,
    types::{GlobalParams, ROW_AFTER_TAX, ROW_NET_INCOME},
};

/// Currency amount to a millions string, e.g. 12_500_000 -> "12.50M".
pub fn format_to_millions(value: f64) -> String {
    format!("{:.2}M", value / 1_000_000.0)
}

/// One display row: the label plus (year, formatted value) pairs in
/// ascending year order, zero-filled across the table's full year set.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedRow {
    pub label: String,
    pub cells: Vec<(String, String)>,
}

pub fn render_table(table: &YearTable) -> Vec<RenderedRow> {
    let years = table.years();
    table
        .rows()
        .iter()
        .map(|row| RenderedRow {
            label: row.label.clone(),
            cells: years
                .iter()
                .map(|year| {
                    let value = row.cells.get(year).copied().unwrap_or(0.0);
                    (year.to_string(), format_to_millions(value))
                })
                .collect(),
        })
        .collect()
}

/// NPV rows as the dashboard labels them, with the applied rates inline:
/// "Net Income - 20%", "After Tax - 25%".
pub fn render_npv_table(analysis: &NpvAnalysis, params: &GlobalParams) -> Vec<RenderedRow> {
    let mut rows = render_table(&analysis.table);
    for row in &mut rows {
        if row.label == ROW_NET_INCOME {
            row.label = format!("{} - {}%", ROW_NET_INCOME, params.sales_margin);
        } else if row.label == ROW_AFTER_TAX {
            row.label = format!("{} - {}%", ROW_AFTER_TAX, params.tax_rate);
        }
    }
    rows
}
