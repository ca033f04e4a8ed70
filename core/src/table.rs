//! Year-keyed tables shared by every pipeline stage.
//!
//! Rows keep insertion order; year columns are implicit — the union of all
//! row cells. An absent cell means "no data", not zero. Summation and the
//! presentation boundary treat absent cells as zero; cell-wise transforms
//! skip them.

use crate::types::Year;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub label: String,
    pub cells: BTreeMap<Year, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearTable {
    rows: Vec<TableRow>,
}

impl YearTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, label: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Append a row. The caller is responsible for label uniqueness;
    /// lookups return the first match.
    pub fn push_row(&mut self, label: impl Into<String>, cells: BTreeMap<Year, f64>) {
        self.rows.push(TableRow {
            label: label.into(),
            cells,
        });
    }

    /// Add `amount` into a cell, creating the row and the year column as
    /// needed. Accumulates rather than overwrites.
    pub fn add(&mut self, label: &str, year: Year, amount: f64) {
        if let Some(row) = self.rows.iter_mut().find(|r| r.label == label) {
            *row.cells.entry(year).or_insert(0.0) += amount;
        } else {
            let mut cells = BTreeMap::new();
            cells.insert(year, amount);
            self.push_row(label, cells);
        }
    }

    pub fn get(&self, label: &str, year: Year) -> Option<f64> {
        self.row(label).and_then(|r| r.cells.get(&year).copied())
    }

    /// The ascending union of every row's year columns.
    pub fn years(&self) -> BTreeSet<Year> {
        self.rows
            .iter()
            .flat_map(|r| r.cells.keys().copied())
            .collect()
    }

    /// Column sum across all rows; absent cells count as zero.
    pub fn column_total(&self, year: Year) -> f64 {
        self.rows
            .iter()
            .filter_map(|r| r.cells.get(&year))
            .sum()
    }

    /// Every column total, over the full year union.
    pub fn column_totals(&self) -> BTreeMap<Year, f64> {
        self.years()
            .into_iter()
            .map(|year| (year, self.column_total(year)))
            .collect()
    }

    /// Apply `f` to every present cell of every row whose label matches
    /// `select`. Absent cells stay absent.
    pub fn map_rows_where<S, F>(&mut self, mut select: S, f: F)
    where
        S: FnMut(&str) -> bool,
        F: Fn(f64) -> f64,
    {
        for row in self.rows.iter_mut().filter(|r| select(&r.label)) {
            for value in row.cells.values_mut() {
                *value = f(*value);
            }
        }
    }

    /// Rename the first row labeled `from`. Returns false if no such row.
    pub fn rename_row(&mut self, from: &str, to: &str) -> bool {
        match self.rows.iter_mut().find(|r| r.label == from) {
            Some(row) => {
                row.label = to.to_string();
                true
            }
            None => false,
        }
    }
}
