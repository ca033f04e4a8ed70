use proptest::prelude::*;
use valuation_core::{
    error::ValuationError,
    royalty::{RoyaltySchedule, RoyaltyTier},
};

fn tier(upto_royalty: f64, royalty_percent: f64) -> RoyaltyTier {
    RoyaltyTier {
        upto_royalty,
        royalty_percent,
    }
}

#[test]
fn two_tier_term_sheet_example() {
    // 1000 x 5% + 2000 x 10% = 250
    let schedule = RoyaltySchedule::new(vec![tier(1000.0, 0.05), tier(5000.0, 0.10)]).unwrap();
    assert_eq!(schedule.royalty_on(3000.0), 250.0);
}

#[test]
fn amount_below_the_first_ceiling_stays_in_the_first_band() {
    let schedule = RoyaltySchedule::new(vec![tier(1000.0, 0.05), tier(5000.0, 0.10)]).unwrap();
    assert_eq!(schedule.royalty_on(800.0), 40.0);
}

#[test]
fn amount_above_every_ceiling_lands_in_the_unbounded_band() {
    let schedule = RoyaltySchedule::new(vec![tier(1000.0, 0.05), tier(5000.0, 0.10)]).unwrap();
    // Everything above the second-to-last ceiling is rated at the last
    // tier's percent: 1000 x 5% + 7000 x 10%.
    assert_eq!(schedule.royalty_on(8000.0), 50.0 + 700.0);
}

#[test]
fn empty_schedule_is_the_identity() {
    let schedule = RoyaltySchedule::empty();
    assert!(schedule.is_empty());
    assert_eq!(schedule.royalty_on(0.0), 0.0);
    assert_eq!(schedule.royalty_on(123_456.78), 123_456.78);

    let built = RoyaltySchedule::new(vec![]).unwrap();
    assert_eq!(built.royalty_on(42.0), 42.0);
}

#[test]
fn single_tier_is_a_flat_rate_on_the_whole_amount() {
    // A one-tier schedule has only the unbounded band, so its ceiling
    // never splits the amount: royalty = sales x pct on both sides of it.
    let schedule = RoyaltySchedule::new(vec![tier(1000.0, 0.08)]).unwrap();
    assert_eq!(schedule.royalty_on(2500.0), 200.0);
    assert_eq!(schedule.royalty_on(500.0), 40.0);
}

#[test]
fn royalty_is_continuous_at_tier_ceilings() {
    let schedule = RoyaltySchedule::new(vec![
        tier(1000.0, 0.05),
        tier(5000.0, 0.10),
        tier(9000.0, 0.20),
    ])
    .unwrap();
    // At the ceiling the band is exhausted exactly.
    assert_eq!(schedule.royalty_on(1000.0), 50.0);
    assert_eq!(schedule.royalty_on(5000.0), 450.0);
    // Just past the ceiling only the marginal sliver is rated higher.
    let just_past = schedule.royalty_on(5000.01);
    assert!((just_past - 450.0 - 0.01 * 0.20).abs() < 1e-9);
}

#[test]
fn non_monotonic_ceilings_are_rejected() {
    let err = RoyaltySchedule::new(vec![tier(5000.0, 0.05), tier(1000.0, 0.10)]).unwrap_err();
    assert!(matches!(err, ValuationError::InvalidTierSchedule { .. }));

    let equal = RoyaltySchedule::new(vec![tier(1000.0, 0.05), tier(1000.0, 0.10)]);
    assert!(equal.is_err(), "equal ceilings are not strictly increasing");
}

#[test]
fn out_of_range_percents_are_rejected() {
    assert!(RoyaltySchedule::new(vec![tier(1000.0, 1.5)]).is_err());
    assert!(RoyaltySchedule::new(vec![tier(1000.0, -0.1)]).is_err());
    assert!(RoyaltySchedule::new(vec![tier(-5.0, 0.1)]).is_err());
}

proptest! {
    #[test]
    fn royalty_is_monotonic_in_sales(a in 0.0f64..1e9, b in 0.0f64..1e9) {
        let schedule = RoyaltySchedule::new(vec![
            tier(10_000.0, 0.04),
            tier(250_000.0, 0.09),
            tier(1_000_000.0, 0.15),
        ]).unwrap();
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(schedule.royalty_on(lo) <= schedule.royalty_on(hi) + 1e-6);
    }

    #[test]
    fn royalty_never_exceeds_the_top_rate(sales in 0.0f64..1e9) {
        let schedule = RoyaltySchedule::new(vec![
            tier(10_000.0, 0.04),
            tier(250_000.0, 0.09),
            tier(1_000_000.0, 0.15),
        ]).unwrap();
        prop_assert!(schedule.royalty_on(sales) <= sales * 0.15 + 1e-6);
    }

    #[test]
    fn royalty_is_linear_within_a_band(x in 10_000.0f64..250_000.0, d in 0.0f64..1000.0) {
        // Between the first and second ceilings the marginal rate is
        // exactly the second tier's percent.
        let schedule = RoyaltySchedule::new(vec![
            tier(10_000.0, 0.04),
            tier(250_000.0, 0.09),
            tier(1_000_000.0, 0.15),
        ]).unwrap();
        prop_assume!(x + d <= 250_000.0);
        let slope = schedule.royalty_on(x + d) - schedule.royalty_on(x);
        prop_assert!((slope - d * 0.09).abs() < 1e-6);
    }
}
