//! 船舶靠港：Poisson 到达，分配给最早空闲的泊位

use rand::Rng;
use tracing::info;

use crate::arrival::poisson_process;
use crate::draw::Draws;
use crate::error::{DrawError, PortSimError};
use crate::server::{Job, ServerKind, ServerPool};
use crate::sim::{PortConfig, SimTime, VesselConfig};

pub const HOURS_PER_YEAR: f64 = 365.0 * 24.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VesselCall {
    pub call_id: u64,
    pub berth: String,
    pub arrival: SimTime,
    pub service: SimTime,
    pub delayed: bool,
    pub start: SimTime,
    pub end: SimTime,
}

impl VesselCall {
    /// 从到达到离港，含等待泊位的时间
    pub fn turnaround(&self) -> SimTime {
        self.end - self.arrival
    }
}

/// 靠泊服务时间：截断正态分布；被标记为延误时再加一段均匀分布的额外时间。
pub fn vessel_service<R: Rng>(
    cfg: &VesselConfig,
    draws: &mut Draws<R>,
) -> Result<(SimTime, bool), DrawError> {
    let mut hours = draws.clamped(&cfg.service_hours)?;
    let delayed = draws.binomial(cfg.delay_probability)?;
    if delayed {
        hours += draws.uniform(cfg.delay_extra_hours.low, cfg.delay_extra_hours.high)?;
    }
    Ok((SimTime::from_hours_f64(hours), delayed))
}

#[tracing::instrument(skip_all, fields(calls_per_year = cfg.vessels.calls_per_year, berths = cfg.fleet.berths.len()))]
pub fn simulate_vessels<R: Rng>(
    cfg: &PortConfig,
    draws: &mut Draws<R>,
) -> Result<Vec<VesselCall>, PortSimError> {
    let rate = cfg.vessels.calls_per_year / HOURS_PER_YEAR;
    let arrivals = poisson_process(draws, rate, cfg.horizon())?;
    let mut berths = ServerPool::of_kind(ServerKind::Berth, cfg.fleet.berths.iter().cloned());

    let mut calls = Vec::with_capacity(arrivals.len());
    for (call_id, arrival) in (0u64..).zip(arrivals) {
        let (service, delayed) = vessel_service(&cfg.vessels, draws)?;
        let slot = berths
            .assign(&Job::new(arrival, service))
            .ok_or_else(|| PortSimError::InvalidConfig("no berths configured".to_string()))?;
        let berth = berths
            .get(slot.server)
            .map(|b| b.name.clone())
            .unwrap_or_default();
        calls.push(VesselCall {
            call_id,
            berth,
            arrival,
            service,
            delayed,
            start: slot.start,
            end: slot.end,
        });
    }

    let queued = calls.iter().filter(|c| c.start > c.arrival).count();
    let delayed = calls.iter().filter(|c| c.delayed).count();
    info!(calls = calls.len(), queued, delayed, "🚢 船舶靠港仿真完成");
    Ok(calls)
}
