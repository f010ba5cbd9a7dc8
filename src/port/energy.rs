//! 逐小时能耗（确定性）：基础负荷按时段和季节缩放，另加固定比例的附加能耗。

use tracing::info;

use super::occupancy::round2;
use crate::sim::{Calendar, EnergyConfig, SimTime};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyRow {
    pub time: SimTime,
    pub kwh: f64,
}

pub fn hourly_kwh(cfg: &EnergyConfig, hour: u32, month: u32) -> f64 {
    let peak = if cfg.peak_hours.contains(hour) {
        cfg.peak_factor
    } else {
        1.0
    };
    let season = if cfg.summer_months.contains(&month) {
        cfg.summer_factor
    } else if cfg.winter_months.contains(&month) {
        cfg.winter_factor
    } else {
        1.0
    };
    round2(cfg.base_kwh * (1.0 + cfg.overhead) * peak * season)
}

pub fn energy_profile(cfg: &EnergyConfig, calendar: &Calendar, horizon: SimTime) -> Vec<EnergyRow> {
    let mut rows = Vec::new();
    let mut time = SimTime::ZERO;
    while time < horizon {
        rows.push(EnergyRow {
            time,
            kwh: hourly_kwh(cfg, calendar.hour_of(time), calendar.month_of(time)),
        });
        time += SimTime::from_hours(1);
    }
    info!(rows = rows.len(), "能耗曲线已生成");
    rows
}
