use std::collections::HashMap;

use std::fs;

use super::{calendar_2025, unique_temp_dir};
use crate::error::PortSimError;
use crate::output::{BERTH_OCCUPANCY, format_timestamp, verify_header};
use crate::port::{PortLogs, hourly_kwh, run_all};
use crate::server::ServerKind;
use crate::sim::{EnergyConfig, PortConfig, SimTime};

fn two_weeks(seed: u64) -> PortLogs {
    let cfg = PortConfig {
        seed,
        horizon_days: 14,
        ..PortConfig::default()
    };
    run_all(&cfg).expect("run")
}

#[test]
fn vessel_calls_respect_berth_exclusivity() {
    let logs = two_weeks(42);
    assert!(!logs.vessels.is_empty());
    let horizon = SimTime::from_days(14);

    let mut by_berth: HashMap<&str, Vec<(SimTime, SimTime)>> = HashMap::new();
    for c in &logs.vessels {
        assert!(c.arrival < horizon);
        assert!(c.start >= c.arrival);
        assert_eq!(c.end, c.start + c.service);
        assert!(c.service >= SimTime::from_hours(1));
        assert!(logs.berths.contains(&c.berth));
        by_berth.entry(c.berth.as_str()).or_default().push((c.start, c.end));
    }
    for intervals in by_berth.values_mut() {
        intervals.sort();
        assert!(intervals.windows(2).all(|w| w[0].1 <= w[1].0));
    }
    assert!(logs.vessels.windows(2).all(|w| w[0].arrival <= w[1].arrival));
}

#[test]
fn container_moves_follow_their_vessel() {
    let logs = two_weeks(42);
    assert!(!logs.container_moves.is_empty());
    let departures: HashMap<u64, SimTime> =
        logs.vessels.iter().map(|c| (c.call_id, c.end)).collect();

    for m in &logs.container_moves {
        assert_eq!(departures.get(&m.call_id), Some(&m.container_arrival));
        assert!(m.move_start >= m.container_arrival);
        assert!(m.move_end > m.move_start);
        assert!((1..=1500).contains(&m.teu_handled));
        let floor = match m.kind {
            ServerKind::YardCrane => SimTime::from_secs(30),
            _ => SimTime::from_secs(20),
        };
        assert!(m.move_end - m.move_start >= floor);
        let prefix = if m.kind == ServerKind::YardCrane { "Yard" } else { "Quay" };
        assert!(m.resource.starts_with(prefix), "{}", m.resource);
    }
}

#[test]
fn crane_downtime_depends_on_crane_class() {
    let logs = two_weeks(42);
    assert!(!logs.crane_failures.is_empty());
    for f in &logs.crane_failures {
        let expected = if f.resource.starts_with("Quay") {
            SimTime::from_hours_f64(1.2)
        } else {
            SimTime::from_hours(1)
        };
        assert_eq!(f.end - f.start, expected);
        assert!(f.start < SimTime::from_days(14));
    }
    assert!(logs.crane_failures.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn hourly_tables_cover_the_horizon() {
    let logs = two_weeks(42);
    assert_eq!(logs.gate.ticks.len(), 14 * 24 * 4);
    assert_eq!(logs.gate.hourly.len(), 14 * 24);
    assert_eq!(logs.gate.hourly[0].time, SimTime::from_hours(1));
    assert_eq!(logs.energy.len(), 14 * 24);

    let arrived: u64 = logs.gate.hourly.iter().map(|r| r.arrivals).sum();
    let processed: u64 = logs.gate.hourly.iter().map(|r| r.num_processed).sum();
    assert_eq!(arrived, logs.gate.arrived);
    assert_eq!(processed, logs.gate.completed.len() as u64);
    assert_eq!(arrived - processed, logs.gate.backlog());
    assert!(
        logs.gate
            .completed
            .iter()
            .all(|t| t.completion.is_some_and(|c| c >= t.arrival + t.service))
    );
}

#[test]
fn daily_occupancy_is_a_share_per_berth() {
    let logs = two_weeks(42);
    assert_eq!(logs.berth_occupancy.len(), 14);
    for (day, row) in logs.berth_occupancy.iter().enumerate() {
        assert_eq!(row.time, SimTime::from_days(day as u64));
        assert_eq!(row.occupancy.len(), 6);
        assert!(row.occupancy.iter().all(|x| (0.0..=1.0).contains(x)));
    }
}

#[test]
fn maintenance_in_the_first_fortnight() {
    let logs = two_weeks(42);
    // 20 cranes get the Sundays of Jan 5 and Jan 12
    let weekly = logs
        .maintenance
        .iter()
        .filter(|e| e.resource.starts_with("Quay") || e.resource.starts_with("Yard"))
        .count();
    assert_eq!(weekly, 40);
    assert!(logs.maintenance.windows(2).all(|w| w[0].start <= w[1].start));
}

#[test]
fn energy_combines_peak_and_season() {
    let cfg = EnergyConfig::default();
    assert!((hourly_kwh(&cfg, 9, 1) - 7262.75).abs() < 1e-6);
    assert!((hourly_kwh(&cfg, 3, 4) - 6890.0).abs() < 1e-6);
    assert!(hourly_kwh(&cfg, 12, 7) > hourly_kwh(&cfg, 12, 4));

    let rows = crate::port::energy_profile(&cfg, &calendar_2025(), SimTime::from_days(1));
    assert_eq!(rows.len(), 24);
    assert!((rows[9].kwh - 7262.75).abs() < 1e-6);
}

#[test]
fn seed_determines_every_table() {
    let a = two_weeks(7);
    let b = two_weeks(7);
    assert_eq!(a.vessels, b.vessels);
    assert_eq!(a.container_moves, b.container_moves);
    assert_eq!(a.crane_failures, b.crane_failures);
    assert_eq!(a.gate.hourly, b.gate.hourly);
    assert_eq!(a.maintenance, b.maintenance);
    assert_eq!(a.berth_occupancy, b.berth_occupancy);

    let c = two_weeks(8);
    assert_ne!(a.vessels, c.vessels);
}

#[test]
fn invalid_config_fails_before_generating() {
    let cfg = PortConfig {
        horizon_days: 0,
        ..PortConfig::default()
    };
    assert!(run_all(&cfg).is_err());

    let cfg = PortConfig {
        horizon_days: u64::MAX,
        ..PortConfig::default()
    };
    assert!(matches!(run_all(&cfg), Err(PortSimError::InvalidConfig(_))));
}

#[test]
fn custom_berth_roster_writes_and_verifies_its_own_columns() {
    let mut cfg = PortConfig {
        horizon_days: 3,
        ..PortConfig::default()
    };
    cfg.fleet.berths = vec!["North".to_string(), "South".to_string()];
    let logs = run_all(&cfg).expect("run");
    assert!(logs.berth_occupancy.iter().all(|r| r.occupancy.len() == 2));
    assert_eq!(logs.required_columns(&BERTH_OCCUPANCY), vec!["time", "North", "South"]);

    let dir = unique_temp_dir("portsim-roster");
    logs.write_all(&dir).expect("write");
    let raw = fs::read_to_string(dir.join(BERTH_OCCUPANCY.file_name)).expect("read");
    assert_eq!(raw.lines().next(), Some("time,North,South"));
    assert!(logs.verify_all(&dir).is_ok());
    // the fixed contract only describes the default roster
    assert!(verify_header(&dir.join(BERTH_OCCUPANCY.file_name), &BERTH_OCCUPANCY).is_err());
    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn gate_rows_close_on_wall_clock_hours_for_a_half_past_start() {
    let cfg = PortConfig {
        start: "2025-01-01 08:30:00".to_string(),
        horizon_days: 1,
        ..PortConfig::default()
    };
    let logs = run_all(&cfg).expect("run");
    assert_eq!(logs.gate.hourly.len(), 24);
    assert_eq!(logs.gate.hourly[0].time, SimTime::from_mins(30));
    for row in &logs.gate.hourly {
        let stamp = format_timestamp(&logs.calendar, row.time);
        assert!(stamp.ends_with(":00:00.000"), "{stamp}");
    }
    assert_eq!(
        format_timestamp(&logs.calendar, logs.gate.hourly[0].time),
        "2025-01-01 09:00:00.000"
    );
}
