//! 闸口流量：每刻钟一批 Poisson 卡车经过单个闸口

use rand::Rng;
use tracing::info;

use crate::arrival::TickArrivals;
use crate::draw::Draws;
use crate::error::PortSimError;
use crate::gate::{GateEntry, GateQueue, HourlyRollup, QueueTick, Truck};
use crate::sim::{Calendar, PortConfig, SimTime};

#[derive(Debug, Default)]
pub struct GateLog {
    pub ticks: Vec<QueueTick>,
    pub hourly: Vec<GateEntry>,
    /// 已通过闸口的卡车，按完成顺序
    pub completed: Vec<Truck>,
    pub arrived: u64,
}

impl GateLog {
    /// 时域结束时仍在排队的卡车数
    pub fn backlog(&self) -> u64 {
        self.ticks.last().map_or(0, |t| t.queue_length)
    }
}

pub fn truck_arrivals(cfg: &PortConfig) -> TickArrivals {
    TickArrivals {
        tick: cfg.gate.tick(),
        base_rate: cfg.gate.base_rate_per_tick(),
        surge_factor: cfg.gate.surge_factor,
        peak_hours: cfg.gate.peak_hours.clone(),
    }
}

#[tracing::instrument(skip_all, fields(trucks_per_day = cfg.gate.trucks_per_day, tick_minutes = cfg.gate.tick_minutes))]
pub fn simulate_gate<R: Rng>(
    cfg: &PortConfig,
    draws: &mut Draws<R>,
    calendar: &Calendar,
) -> Result<GateLog, PortSimError> {
    let counts = truck_arrivals(cfg).generate(draws, calendar, cfg.horizon())?;

    let mut gate = GateQueue::new(cfg.gate.tick());
    let mut rollup = HourlyRollup::new(*calendar);
    let mut log = GateLog {
        ticks: Vec::with_capacity(counts.len()),
        ..GateLog::default()
    };
    for tc in counts {
        let mut batch = Vec::with_capacity(tc.count as usize);
        for _ in 0..tc.count {
            let service = SimTime::from_mins_f64(draws.clamped(&cfg.gate.service_mins)?);
            batch.push(Truck::new(log.arrived, tc.start, service));
            log.arrived += 1;
        }
        let tick = gate.step(batch);
        rollup.push(&tick);
        log.ticks.push(tick);
        log.completed.extend(gate.take_completed());
    }
    log.hourly = rollup.into_rows();

    info!(
        arrived = log.arrived,
        processed = log.completed.len(),
        backlog = log.backlog(),
        "🚧 闸口仿真完成"
    );
    Ok(log)
}
