//! 全年驱动：每个生成器使用独立随机流运行，并写出结果表。

use std::path::{Path, PathBuf};

use tracing::info;

use super::containers::{ContainerMove, simulate_container_moves};
use super::cranes::simulate_crane_failures;
use super::energy::{EnergyRow, energy_profile};
use super::gate::{GateLog, simulate_gate};
use super::occupancy::{OccupancyRow, simulate_berth_occupancy};
use super::upkeep::simulate_maintenance;
use super::vessels::{VesselCall, simulate_vessels};
use crate::draw::Streams;
use crate::error::PortSimError;
use crate::failure::FailureInterval;
use crate::maintenance::MaintenanceEvent;
use crate::output::{
    ALL_TABLES, BERTH_OCCUPANCY, CONTAINER_MOVES, CRANE_UPTIME, ENERGY_CONSUMPTION, GATE_ENTRIES,
    MAINTENANCE_EVENTS, TableSchema, VESSEL_TURNAROUND, verify_columns, write_table,
};
use crate::sim::{Calendar, PortConfig};

/// 一次运行产生的全部表
#[derive(Debug)]
pub struct PortLogs {
    pub calendar: Calendar,
    pub berths: Vec<String>,
    pub berth_occupancy: Vec<OccupancyRow>,
    pub vessels: Vec<VesselCall>,
    pub container_moves: Vec<ContainerMove>,
    pub crane_failures: Vec<FailureInterval>,
    pub gate: GateLog,
    pub energy: Vec<EnergyRow>,
    pub maintenance: Vec<MaintenanceEvent>,
}

#[tracing::instrument(skip(cfg), fields(seed = cfg.seed, horizon_days = cfg.horizon_days))]
pub fn run_all(cfg: &PortConfig) -> Result<PortLogs, PortSimError> {
    cfg.validate()?;
    let calendar = cfg.calendar()?;
    let streams = Streams::new(cfg.seed);
    info!(start = %calendar.start(), "🚀 开始港口仿真");

    let berth_occupancy =
        simulate_berth_occupancy(cfg, &mut streams.stream("berth_occupancy"), &calendar)?;
    let vessels = simulate_vessels(cfg, &mut streams.stream("vessels"))?;
    let container_moves =
        simulate_container_moves(cfg, &mut streams.stream("container_moves"), &vessels)?;
    let crane_failures = simulate_crane_failures(cfg, &mut streams.stream("crane_uptime"))?;
    let gate = simulate_gate(cfg, &mut streams.stream("gate"), &calendar)?;
    let energy = energy_profile(&cfg.energy, &calendar, cfg.horizon());
    let maintenance = simulate_maintenance(cfg, &mut streams.stream("maintenance"), &calendar)?;

    info!("✅ 港口仿真完成");
    Ok(PortLogs {
        calendar,
        berths: cfg.fleet.berths.clone(),
        berth_occupancy,
        vessels,
        container_moves,
        crane_failures,
        gate,
        energy,
        maintenance,
    })
}

impl PortLogs {
    /// 把七张表写入 `dir`（不存在则创建）
    pub fn write_all(&self, dir: &Path) -> Result<Vec<PathBuf>, PortSimError> {
        std::fs::create_dir_all(dir)?;
        let cal = &self.calendar;

        let occupancy_header = self.required_columns(&BERTH_OCCUPANCY);

        let paths = vec![
            write_table(dir, &BERTH_OCCUPANCY, &occupancy_header, &self.berth_occupancy, cal)?,
            write_table(dir, &VESSEL_TURNAROUND, VESSEL_TURNAROUND.columns, &self.vessels, cal)?,
            write_table(dir, &CONTAINER_MOVES, CONTAINER_MOVES.columns, &self.container_moves, cal)?,
            write_table(dir, &CRANE_UPTIME, CRANE_UPTIME.columns, &self.crane_failures, cal)?,
            write_table(dir, &GATE_ENTRIES, GATE_ENTRIES.columns, &self.gate.hourly, cal)?,
            write_table(dir, &ENERGY_CONSUMPTION, ENERGY_CONSUMPTION.columns, &self.energy, cal)?,
            write_table(dir, &MAINTENANCE_EVENTS, MAINTENANCE_EVENTS.columns, &self.maintenance, cal)?,
        ];
        info!(dir = %dir.display(), tables = paths.len(), "全部表已写入");
        Ok(paths)
    }

    /// 本次运行写出的 `schema` 表头：泊位占用率表每个配置泊位一列，其余表为固定列。
    pub fn required_columns(&self, schema: &TableSchema) -> Vec<&str> {
        if schema.name == BERTH_OCCUPANCY.name {
            let mut cols = vec!["time"];
            cols.extend(self.berths.iter().map(String::as_str));
            cols
        } else {
            schema.columns.to_vec()
        }
    }

    /// 回读 `dir` 中的每张表并校验表头
    pub fn verify_all(&self, dir: &Path) -> Result<(), PortSimError> {
        for schema in &ALL_TABLES {
            verify_columns(&dir.join(schema.file_name), &self.required_columns(schema))?;
        }
        Ok(())
    }

    /// 按写出顺序的 `(表名, 行数)`
    pub fn row_counts(&self) -> Vec<(&'static str, usize)> {
        vec![
            (BERTH_OCCUPANCY.name, self.berth_occupancy.len()),
            (VESSEL_TURNAROUND.name, self.vessels.len()),
            (CONTAINER_MOVES.name, self.container_moves.len()),
            (CRANE_UPTIME.name, self.crane_failures.len()),
            (GATE_ENTRIES.name, self.gate.hourly.len()),
            (ENERGY_CONSUMPTION.name, self.energy.len()),
            (MAINTENANCE_EVENTS.name, self.maintenance.len()),
        ]
    }
}
