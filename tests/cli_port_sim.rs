use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

const TABLES: [(&str, &str); 7] = [
    ("berth_occupancy.csv", "time,MP1,MP2,MP3,MP4,CT1,CT2"),
    ("vessel_turnaround.csv", "arrival_time,berth,service_time,delay_flag,start_time,end_time"),
    (
        "container_moves.csv",
        "container_arrival,call_id,teu_handled,resource_assigned,move_start,move_end",
    ),
    ("crane_uptime.csv", "resource_name,downtime_start,downtime_end"),
    ("gate_entries.csv", "time,arrivals,num_processed,queue_length"),
    ("energy_consumption.csv", "time,energy_kWh"),
    ("maintenance_events.csv", "time,resource,maintenance_duration"),
];

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "portsim-rs-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

fn port_sim(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_port_sim"))
        .args(args)
        .output()
        .expect("run port_sim")
}

fn read(dir: &Path, name: &str) -> String {
    fs::read_to_string(dir.join(name)).expect("read table")
}

#[test]
fn port_sim_writes_every_table_with_its_header() {
    let dir = unique_temp_dir("tables");
    let output = port_sim(&[
        "--out-dir",
        dir.to_str().unwrap(),
        "--days",
        "7",
        "--seed",
        "1",
        "--verify",
    ]);
    assert!(
        output.status.success(),
        "port_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    for (file, header) in TABLES {
        let raw = read(&dir, file);
        assert_eq!(raw.lines().next(), Some(header), "header of {file}");
    }
    assert_eq!(read(&dir, "gate_entries.csv").lines().count(), 7 * 24 + 1);
    assert_eq!(read(&dir, "energy_consumption.csv").lines().count(), 7 * 24 + 1);
    assert_eq!(read(&dir, "berth_occupancy.csv").lines().count(), 7 + 1);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.lines().any(|l| l == "table gate_entries rows=168"));
    assert!(stdout.lines().any(|l| l.starts_with("gate arrived=")));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn port_sim_is_reproducible_from_a_config_file() {
    let dir = unique_temp_dir("config");
    let config = dir.join("port.json");
    fs::write(
        &config,
        r#"{ "seed": 11, "horizon_days": 3, "cranes": { "overlap": "clamp_gap" } }"#,
    )
    .expect("write config");

    let mut runs = Vec::new();
    for run in ["a", "b"] {
        let out_dir = dir.join(run);
        let output = port_sim(&[
            "--config",
            config.to_str().unwrap(),
            "--out-dir",
            out_dir.to_str().unwrap(),
        ]);
        assert!(output.status.success(), "run {run} failed");
        runs.push(out_dir);
    }

    for (file, _) in TABLES {
        assert_eq!(read(&runs[0], file), read(&runs[1], file), "{file} differs");
    }

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn port_sim_verifies_a_custom_berth_roster() {
    let dir = unique_temp_dir("roster");
    let config = dir.join("port.json");
    fs::write(
        &config,
        r#"{ "horizon_days": 2, "fleet": { "berths": ["North", "South", "East"] } }"#,
    )
    .expect("write config");

    let out_dir = dir.join("out");
    let output = port_sim(&[
        "--config",
        config.to_str().unwrap(),
        "--out-dir",
        out_dir.to_str().unwrap(),
        "--verify",
    ]);
    assert!(
        output.status.success(),
        "port_sim failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        read(&out_dir, "berth_occupancy.csv").lines().next(),
        Some("time,North,South,East")
    );

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn port_sim_rejects_an_invalid_config() {
    let dir = unique_temp_dir("invalid");
    let config = dir.join("port.json");
    fs::write(&config, r#"{ "gate": { "tick_minutes": 7 } }"#).expect("write config");

    let output = port_sim(&[
        "--config",
        config.to_str().unwrap(),
        "--out-dir",
        dir.join("out").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"), "stderr={stderr}");
    assert!(!dir.join("out").join("gate_entries.csv").exists());

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn port_sim_prints_the_effective_config() {
    let output = port_sim(&["--print-config", "--seed", "99", "--failure-overlap", "clamp_gap"]);
    assert!(output.status.success());
    let v: Value = serde_json::from_slice(&output.stdout).expect("config json");
    assert_eq!(v.get("seed").and_then(Value::as_u64), Some(99));
    assert_eq!(
        v.pointer("/cranes/overlap").and_then(Value::as_str),
        Some("clamp_gap")
    );
    assert_eq!(v.get("horizon_days").and_then(Value::as_u64), Some(365));
}
