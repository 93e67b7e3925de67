//! Property tests for the forecast table shape.
//!
//! For any horizon in [30, 1825] and any series of at least two rows on
//! distinct dates, the table ends exactly `horizon` days after the last
//! observation and holds history rows plus one row per horizon day.

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;
use stockcast_core::config::ForecastConfig;
use stockcast_core::{AdditiveEngine, ForecastEngine, ForecastHorizon, PriceBar, PriceSeries};

fn engine() -> AdditiveEngine {
    AdditiveEngine::new(ForecastConfig {
        uncertainty_samples: 10,
        ..ForecastConfig::default()
    })
}

fn arb_series() -> impl Strategy<Value = PriceSeries> {
    (
        prop::collection::vec((1i64..5, 1.0..500.0_f64), 2..80),
        0i64..3000,
    )
        .prop_map(|(steps, offset)| {
            let mut date = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Duration::days(offset);
            let bars = steps
                .into_iter()
                .map(|(gap, close)| {
                    date += Duration::days(gap);
                    PriceBar {
                        date,
                        open: close,
                        high: close,
                        low: close,
                        close,
                        adj_close: close,
                        volume: 1,
                    }
                })
                .collect();
            PriceSeries::new("PROP", bars)
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn table_covers_history_plus_horizon(series in arb_series(), days in 30u32..=1825) {
        let horizon = ForecastHorizon::new(days).unwrap();
        let result = engine().forecast(&series, horizon).unwrap();
        let last = series.last_date().unwrap();

        prop_assert_eq!(result.table.last_date(), Some(last + Duration::days(i64::from(days))));
        prop_assert_eq!(result.table.len(), series.len() + days as usize);
        prop_assert_eq!(result.table.first_date(), series.first_date());
        prop_assert!(result.table.bounds_ordered());
    }

    #[test]
    fn horizon_construction_respects_range(days in 0u32..4000) {
        let ok = ForecastHorizon::new(days).is_ok();
        prop_assert_eq!(ok, (30..=1825).contains(&days));
    }
}

#[test]
fn nan_closes_do_not_shrink_the_table() {
    let start = NaiveDate::from_ymd_opt(2023, 6, 1).unwrap();
    let bars: Vec<PriceBar> = (0..30)
        .map(|i| {
            let close = if i == 10 { f64::NAN } else { 20.0 + i as f64 };
            PriceBar {
                date: start + Duration::days(i),
                open: close,
                high: close,
                low: close,
                close,
                adj_close: close,
                volume: 1,
            }
        })
        .collect();
    let series = PriceSeries::new("NAN", bars);
    let result = engine()
        .forecast(&series, ForecastHorizon::new(30).unwrap())
        .unwrap();
    assert_eq!(result.table.len(), 60);
    assert!(result.table.rows().iter().all(|r| r.yhat.is_finite()));
}
