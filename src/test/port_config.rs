use chrono::Timelike;

use crate::error::PortSimError;
use crate::failure::FailureOverlap;
use crate::sim::{PeakWindow, PortConfig};

#[test]
fn empty_object_is_the_baseline_terminal() {
    let cfg = PortConfig::from_json("{}").expect("parse");
    assert_eq!(cfg, PortConfig::default());
    assert_eq!(cfg.seed, 42);
    assert_eq!(cfg.horizon_days, 365);
    assert_eq!(cfg.fleet.berths.len(), 6);
    assert_eq!(cfg.fleet.quay_names()[0], "Quay1");
    assert_eq!(cfg.fleet.yard_names().len(), 14);
    assert_eq!(cfg.gate.peak_hours, vec![PeakWindow::new(8, 10), PeakWindow::new(17, 19)]);
    assert!(cfg.validate().is_ok());
}

#[test]
fn partial_sections_keep_their_other_defaults() {
    let cfg = PortConfig::from_json(
        r#"{"seed": 7, "gate": {"trucks_per_day": 96}, "cranes": {"overlap": "clamp_gap"}}"#,
    )
    .expect("parse");
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.gate.trucks_per_day, 96.0);
    assert_eq!(cfg.gate.tick_minutes, 15);
    assert!((cfg.gate.base_rate_per_tick() - 1.0).abs() < 1e-12);
    assert_eq!(cfg.cranes.overlap, FailureOverlap::ClampGap);
    assert_eq!(cfg.cranes.weibull_shape, 1.7);
}

#[test]
fn tick_that_does_not_divide_an_hour_is_rejected() {
    let mut cfg = PortConfig::default();
    cfg.gate.tick_minutes = 7;
    assert!(matches!(cfg.validate(), Err(PortSimError::InvalidConfig(_))));
}

#[test]
fn bad_parameters_are_rejected() {
    let mut cfg = PortConfig::default();
    cfg.vessels.delay_probability = 1.5;
    assert!(cfg.validate().is_err());

    let mut cfg = PortConfig::default();
    cfg.fleet.berths.clear();
    assert!(cfg.validate().is_err());

    let mut cfg = PortConfig::default();
    cfg.maintenance.week_anchor = 9;
    assert!(cfg.validate().is_err());

    let mut cfg = PortConfig::default();
    cfg.start = "first of january".to_string();
    assert!(matches!(cfg.validate(), Err(PortSimError::InvalidConfig(_))));

    assert!(PortConfig::from_json(r#"{"seed": "x"}"#).is_err());

    let mut cfg = PortConfig::default();
    cfg.horizon_days = u64::MAX;
    assert!(matches!(cfg.validate(), Err(PortSimError::InvalidConfig(_))));
}

#[test]
fn horizon_must_fit_the_nanosecond_clock() {
    let mut cfg = PortConfig::default();
    cfg.horizon_days = 213_503;
    assert!(cfg.validate().is_ok());
    cfg.horizon_days = 213_504;
    assert!(matches!(cfg.validate(), Err(PortSimError::InvalidConfig(_))));
}

#[test]
fn date_only_start_means_midnight() {
    let cfg = PortConfig {
        start: "2024-06-15".to_string(),
        ..PortConfig::default()
    };
    let start = cfg.calendar().expect("calendar").start();
    assert_eq!(start.to_string(), "2024-06-15 00:00:00");
    assert_eq!(start.hour(), 0);
}

#[test]
fn seasonal_means_follow_the_month() {
    let occ = PortConfig::default().berth_occupancy;
    assert!((occ.mean_for_month(8) - 0.64).abs() < 1e-9);
    assert!((occ.mean_for_month(1) - 0.87).abs() < 1e-9);
    assert!((occ.mean_for_month(4) - 0.78).abs() < 1e-9);
}

#[test]
fn start_must_sit_on_a_gate_tick() {
    let mut cfg = PortConfig {
        start: "2025-01-01 08:30:00".to_string(),
        ..PortConfig::default()
    };
    assert!(cfg.validate().is_ok());

    cfg.start = "2025-01-01 08:07:00".to_string();
    assert!(matches!(cfg.validate(), Err(PortSimError::InvalidConfig(_))));

    cfg.start = "2025-01-01 08:15:30".to_string();
    assert!(cfg.validate().is_err());
}
