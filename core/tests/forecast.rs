//! Seeded forecast generator tests.

use chrono::NaiveDate;
use wfm_core::{
    config::ForecastConfig,
    forecast::{daily_breakdown, weekly_volume, ForecastModel},
    rng::seeded_random,
    types::SLOTS_PER_DAY,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn daily_breakdown_is_deterministic() {
    for day in [date(2023, 1, 1), date(2024, 2, 29), date(2025, 12, 31)] {
        let first = daily_breakdown(day);
        let second = daily_breakdown(day);
        assert_eq!(first, second, "curve for {day} changed between calls");
    }
}

#[test]
fn daily_breakdown_has_48_labelled_half_hour_slots() {
    let curve = daily_breakdown(date(2024, 3, 6));

    assert_eq!(curve.len(), SLOTS_PER_DAY);
    assert_eq!(curve[0].time, "00:00");
    assert_eq!(curve[1].time, "00:30");
    assert_eq!(curve[19].time, "09:30");
    assert_eq!(curve[20].time, "10:00");
    assert_eq!(curve[47].time, "23:30");
}

#[test]
fn daily_breakdown_matches_the_curve_formula() {
    let day = date(2024, 3, 6);
    let seed_base = 20_240_306.0;
    let curve = daily_breakdown(day);

    for (i, sample) in curve.iter().enumerate() {
        let x = i as f64;
        let peak1 = 100.0 * (-(x - 20.0).powi(2) / 50.0).exp();
        let peak2 = 80.0 * (-(x - 30.0).powi(2) / 50.0).exp();
        let noise = seeded_random(seed_base + x * 13.0) * 15.0;
        let expected = (20.0 + peak1 + peak2 + noise).floor().max(0.0) as u32;
        assert_eq!(sample.calls, expected, "slot {i}");
    }
}

#[test]
fn daily_curve_has_a_midday_rush() {
    let curve = daily_breakdown(date(2024, 7, 15));

    // Overnight is base + noise only; late morning sits under both peaks.
    assert!(curve[4].calls < 40, "04:00 was {}", curve[4].calls);
    assert!(curve[22].calls > 130, "11:00 was {}", curve[22].calls);
    assert!(curve.iter().all(|s| s.calls <= 215));
}

#[test]
fn different_days_get_different_noise() {
    let a = daily_breakdown(date(2024, 3, 6));
    let b = daily_breakdown(date(2024, 3, 7));
    assert_ne!(a, b);
}

#[test]
fn weekly_volume_never_drops_below_floor() {
    let mut day = date(2023, 1, 1);
    let end = date(2025, 12, 31);
    while day <= end {
        assert!(weekly_volume(day) >= 4000, "{day} below floor");
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn weekday_and_weekend_totals_sit_around_their_bases() {
    // 2024-03-04 is a Monday.
    let monday = date(2024, 3, 4);
    let saturday = date(2024, 3, 9);
    let sunday = date(2024, 3, 10);

    let weekday = weekly_volume(monday);
    assert!((11_500..13_500).contains(&weekday), "weekday total {weekday}");

    for day in [saturday, sunday] {
        let total = weekly_volume(day);
        assert!((5_000..7_000).contains(&total), "{day} total {total}");
    }
}

#[test]
fn weekly_volume_matches_the_daily_formula() {
    let day = date(2024, 3, 6);
    let r = seeded_random(20_240_306.0);
    let noise = r * 2000.0 - 1000.0;
    let expected = (12_500.0 + noise).floor().max(4000.0) as u32;
    assert_eq!(weekly_volume(day), expected);
}

#[test]
fn hourly_estimate_is_twelve_percent_of_the_day() {
    let model = ForecastModel::default();
    assert_eq!(model.estimated_hourly(12_500), 1_500);
    assert_eq!(model.estimated_hourly(6_000), 720);
    assert_eq!(model.estimated_hourly(4_004), 480);

    let day = date(2024, 3, 6);
    assert_eq!(
        model.hourly_volume_for_date(day),
        model.estimated_hourly(weekly_volume(day))
    );
}

#[test]
fn week_forecast_labels_and_flags_days() {
    let model = ForecastModel::default();
    let monday = date(2024, 3, 4);
    let today = date(2024, 3, 6);
    let selected = date(2024, 3, 8);

    let week = model.week_forecast(monday, today, selected).unwrap();

    assert_eq!(week.len(), 7);
    assert_eq!(week[0].name, "Mon 3/4");
    assert_eq!(week[0].full_name, "Monday, Mar 4");
    assert_eq!(week[6].name, "Sun 3/10");
    assert_eq!(week[6].date, date(2024, 3, 10));

    let todays: Vec<_> = week.iter().filter(|d| d.is_today).map(|d| d.date).collect();
    let selected_days: Vec<_> = week.iter().filter(|d| d.is_selected).map(|d| d.date).collect();
    assert_eq!(todays, vec![today]);
    assert_eq!(selected_days, vec![selected]);

    for day in &week {
        assert_eq!(day.calls, weekly_volume(day.date));
    }
}

#[test]
fn model_follows_its_config() {
    let flat = ForecastConfig {
        peaks: vec![],
        slot_noise_amplitude: 0.0,
        ..ForecastConfig::default()
    };
    let curve = ForecastModel::new(flat).daily_breakdown(date(2024, 3, 6));
    assert!(curve.iter().all(|s| s.calls == 20));
}
