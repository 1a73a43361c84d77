use chrono::{NaiveDate, TimeZone, Utc};
use equity_curve_wasm::application::BuildDailyEquitySeriesUseCase;
use equity_curve_wasm::domain::equity::{AccountSnapshot, DailyEquityBuilder, EquitySeries};
use equity_curve_wasm::domain::errors::{AppError, DomainError};

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn snapshot(y: i32, m: u32, d: u32, hour: u32, equity: Option<f64>) -> AccountSnapshot {
    AccountSnapshot::new(Utc.with_ymd_and_hms(y, m, d, hour, 0, 0).unwrap(), equity)
}

fn changes(series: &EquitySeries) -> Vec<f64> {
    series.records().iter().map(|r| r.equity_change.value()).collect()
}

#[test]
fn forward_fills_days_without_snapshots() {
    let builder = DailyEquityBuilder::new(1000.0, day(2026, 1, 1), day(2026, 1, 5)).unwrap();
    let series = builder
        .build(&[
            snapshot(2026, 1, 2, 9, Some(1010.0)),
            snapshot(2026, 1, 2, 18, Some(1025.5)),
            snapshot(2026, 1, 4, 12, Some(990.0)),
        ])
        .unwrap();

    assert_eq!(
        series.labels(),
        vec!["2026-01-01", "2026-01-02", "2026-01-03", "2026-01-04", "2026-01-05"]
    );
    assert_eq!(series.values(), vec![1000.0, 1025.5, 1025.5, 990.0, 990.0]);
    assert_eq!(changes(&series), vec![0.0, 25.5, 0.0, -35.5, 0.0]);
}

#[test]
fn snapshots_before_window_seed_opening_equity() {
    let builder = DailyEquityBuilder::new(1000.0, day(2026, 3, 1), day(2026, 3, 2)).unwrap();
    let series = builder
        .build(&[snapshot(2026, 2, 20, 10, Some(1200.0)), snapshot(2026, 3, 2, 10, Some(1250.0))])
        .unwrap();
    assert_eq!(series.values(), vec![1200.0, 1250.0]);
    assert_eq!(series.daily_pnl().to_string(), "50.00 $");
}

#[test]
fn unordered_snapshots_are_sorted_by_update_time() {
    let builder = DailyEquityBuilder::new(0.0, day(2026, 1, 1), day(2026, 1, 1)).unwrap();
    let series = builder
        .build(&[snapshot(2026, 1, 1, 20, Some(30.0)), snapshot(2026, 1, 1, 8, Some(10.0))])
        .unwrap();
    assert_eq!(series.values(), vec![30.0]);
}

#[test]
fn missing_equity_carries_previous_value() {
    let builder = DailyEquityBuilder::new(500.0, day(2026, 1, 1), day(2026, 1, 2)).unwrap();
    let series = builder
        .build(&[snapshot(2026, 1, 1, 9, Some(510.0)), snapshot(2026, 1, 2, 9, None)])
        .unwrap();
    assert_eq!(series.values(), vec![510.0, 510.0]);
}

#[test]
fn changes_are_rounded_to_cents() {
    let builder = DailyEquityBuilder::new(0.0, day(2026, 1, 1), day(2026, 1, 2)).unwrap();
    let series = builder
        .build(&[snapshot(2026, 1, 1, 9, Some(0.1)), snapshot(2026, 1, 2, 9, Some(0.3))])
        .unwrap();
    assert_eq!(changes(&series), vec![0.0, 0.2]);
}

#[test]
fn reversed_window_is_rejected() {
    assert_eq!(
        DailyEquityBuilder::new(1.0, day(2026, 2, 1), day(2026, 1, 1)).unwrap_err(),
        DomainError::InvalidDateWindow { start: day(2026, 2, 1), end: day(2026, 1, 1) }
    );
    assert!(matches!(
        DailyEquityBuilder::new(f64::NAN, day(2026, 1, 1), day(2026, 1, 1)),
        Err(DomainError::InvalidInputData(_))
    ));
}

#[test]
fn json_use_case_emits_embeddable_series() {
    let use_case = BuildDailyEquitySeriesUseCase::new(100.0, "2026-01-01", "2026-01-02").unwrap();
    let json = use_case
        .execute_json(r#"[{"time_last_update": "2026-01-02T10:00:00Z", "equity": 110.0}]"#)
        .unwrap();
    insta::assert_snapshot!(json, @r#"[{"time_close":"2026-01-01","equity":100.0,"equity_change":0.0},{"time_close":"2026-01-02","equity":110.0,"equity_change":10.0}]"#);

    let series = EquitySeries::from_json(&json).unwrap();
    assert_eq!(series.daily_pnl().to_string(), "10.00 $");
}

#[test]
fn bad_dates_and_payloads_are_reported() {
    assert!(matches!(
        BuildDailyEquitySeriesUseCase::new(100.0, "01/02/2026", "2026-01-02"),
        Err(AppError::Domain(DomainError::InvalidInputData(_)))
    ));

    let use_case = BuildDailyEquitySeriesUseCase::new(100.0, "2026-01-01", "2026-01-02").unwrap();
    assert!(matches!(
        use_case.execute_json("{\"not\": \"a list\"}"),
        Err(AppError::Domain(DomainError::InvalidInputData(_)))
    ));
}

#[test]
fn zero_equity_is_a_real_value() {
    let builder = DailyEquityBuilder::new(500.0, day(2026, 1, 1), day(2026, 1, 3)).unwrap();
    let series = builder
        .build(&[snapshot(2026, 1, 2, 9, Some(0.0)), snapshot(2026, 1, 3, 9, Some(f64::NAN))])
        .unwrap();
    assert_eq!(series.values(), vec![500.0, 0.0, 0.0]);
    assert_eq!(changes(&series), vec![0.0, -500.0, 0.0]);
}
