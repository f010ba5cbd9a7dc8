//! 带季节波动的逐日泊位占用率

use rand::Rng;
use tracing::info;

use crate::draw::Draws;
use crate::error::PortSimError;
use crate::sim::{Calendar, PortConfig, SimTime};

#[derive(Debug, Clone, PartialEq)]
pub struct OccupancyRow {
    pub time: SimTime,
    /// 每个泊位一个占用率，按泊位名单顺序
    pub occupancy: Vec<f64>,
}

pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[tracing::instrument(skip_all, fields(days = cfg.horizon_days))]
pub fn simulate_berth_occupancy<R: Rng>(
    cfg: &PortConfig,
    draws: &mut Draws<R>,
    calendar: &Calendar,
) -> Result<Vec<OccupancyRow>, PortSimError> {
    let occ = &cfg.berth_occupancy;
    let mut rows = Vec::with_capacity(cfg.horizon_days as usize);
    for day in 0..cfg.horizon_days {
        let time = SimTime::from_days(day);
        let mean = occ.mean_for_month(calendar.month_of(time));
        let occupancy = cfg
            .fleet
            .berths
            .iter()
            .map(|_| {
                draws
                    .normal_clamped(mean, occ.stdev, 0.0)
                    .map(|x| round2(x.min(1.0)))
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(OccupancyRow { time, occupancy });
    }
    info!(rows = rows.len(), "泊位占用率仿真完成");
    Ok(rows)
}
