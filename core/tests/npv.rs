use valuation_core::{
    error::ValuationError,
    npv::{discounted_cash_flow, BASE_YEAR},
    revenue::assemble_and_snapshot,
    store::ValuationStore,
    table::YearTable,
    types::{
        GlobalParams, Region, ROW_AFTER_TAX, ROW_NET_INCOME, ROW_PRESENT_VALUE,
        ROW_TOTAL_REVENUE,
    },
};

fn params(sales_margin: f64, tax_rate: f64, discount_rate: f64) -> GlobalParams {
    GlobalParams {
        sales_margin,
        tax_rate,
        discount_rate,
    }
}

fn revenue_table(cells: &[(i32, f64)]) -> YearTable {
    let mut table = YearTable::new();
    for &(year, amount) in cells {
        table.add(ROW_TOTAL_REVENUE, year, amount);
    }
    table
}

#[test]
fn hand_computed_discounted_sum() {
    let revenue = revenue_table(&[(2023, 1000.0), (2024, 1100.0)]);
    let analysis =
        discounted_cash_flow(&revenue, &params(20.0, 25.0, 10.0), 2023).unwrap();

    assert_eq!(analysis.table.get(ROW_NET_INCOME, 2023), Some(200.0));
    assert_eq!(analysis.table.get(ROW_NET_INCOME, 2024), Some(220.0));
    assert_eq!(analysis.table.get(ROW_AFTER_TAX, 2023), Some(150.0));
    assert_eq!(analysis.table.get(ROW_AFTER_TAX, 2024), Some(165.0));

    // PV: 150 / 1.1^0 + 165 / 1.1^1 = 150 + 150 = 300
    let pv_2024 = analysis.table.get(ROW_PRESENT_VALUE, 2024).unwrap();
    assert!((pv_2024 - 150.0).abs() < 1e-9);
    assert!((analysis.npv - 300.0).abs() < 1e-9);
}

#[test]
fn recomputation_is_idempotent() {
    let revenue = revenue_table(&[(2023, 1000.0), (2026, 4200.0)]);
    let p = params(35.0, 21.0, 8.0);
    let first = discounted_cash_flow(&revenue, &p, BASE_YEAR).unwrap();
    let second = discounted_cash_flow(&revenue, &p, BASE_YEAR).unwrap();
    assert_eq!(first.table, second.table);
    assert_eq!(first.npv.to_bits(), second.npv.to_bits());
}

#[test]
fn years_before_the_base_year_inflate() {
    let revenue = revenue_table(&[(2022, 100.0)]);
    let analysis =
        discounted_cash_flow(&revenue, &params(100.0, 0.0, 10.0), 2023).unwrap();
    let pv = analysis.table.get(ROW_PRESENT_VALUE, 2022).unwrap();
    assert!(
        pv > 100.0,
        "negative periods compound instead of discounting; got {pv}"
    );
    assert!((pv - 110.0).abs() < 1e-9);
}

#[test]
fn discount_rate_at_or_below_minus_100_is_rejected() {
    let revenue = revenue_table(&[(2024, 100.0)]);
    for rate in [-100.0, -250.0] {
        let err =
            discounted_cash_flow(&revenue, &params(20.0, 25.0, rate), BASE_YEAR).unwrap_err();
        assert!(matches!(err, ValuationError::ArithmeticDomain { .. }));
    }
}

#[test]
fn missing_global_params_is_a_configuration_error() {
    let store = ValuationStore::in_memory().unwrap();
    store.migrate().unwrap();
    let err = store.global_params().unwrap_err();
    assert!(matches!(err, ValuationError::MissingConfiguration));
}

#[test]
fn absent_total_cells_are_zero_filled_across_the_year_union() {
    // A milestone-only year leaves a hole in the total row of the input.
    let mut revenue = revenue_table(&[(2025, 100.0)]);
    revenue.add("Development Milestones", 2026, 50.0);

    let analysis =
        discounted_cash_flow(&revenue, &params(100.0, 0.0, 0.0), 2025).unwrap();
    assert_eq!(analysis.table.get(ROW_TOTAL_REVENUE, 2026), Some(0.0));
    assert_eq!(analysis.table.get(ROW_PRESENT_VALUE, 2026), Some(0.0));
    assert_eq!(analysis.npv, 100.0);
}

#[test]
fn a_table_without_a_total_row_is_recomputed() {
    let mut revenue = YearTable::new();
    revenue.add("US", 2025, 100.0);
    revenue.add("Europe", 2025, 50.0);

    let analysis =
        discounted_cash_flow(&revenue, &params(100.0, 0.0, 0.0), 2025).unwrap();
    assert_eq!(analysis.npv, 150.0);
}

#[test]
fn full_pipeline_from_store_to_npv() {
    let _ = env_logger::builder().is_test(true).try_init();
    let store = ValuationStore::in_memory().unwrap();
    store.migrate().unwrap();
    let asset_id = store.insert_asset("Oncastat", 100, 100, 50).unwrap();
    store.insert_patient_schedule(&asset_id, Region::Us, 2024, 50).unwrap();
    store.insert_patient_schedule(&asset_id, Region::Us, 2025, 80).unwrap();
    store.insert_royalty_tier(&asset_id, 4000.0, 0.10).unwrap();
    store.set_global_params(&params(50.0, 20.0, 10.0)).unwrap();

    let snapshot = assemble_and_snapshot(&store, "Oncastat", &[Region::Us]).unwrap();
    let p = store.global_params().unwrap();
    let analysis = discounted_cash_flow(&snapshot.table, &p, 2024).unwrap();

    // Flat 10% royalty on 5000 and 8000, margin 50%, tax 20%:
    // after-tax 200 and 320, PV 200 + 320/1.1.
    let expected = 200.0 + 320.0 / 1.1;
    assert!((analysis.npv - expected).abs() < 1e-9);
}
