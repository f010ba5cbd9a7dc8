//! 到达过程
//!
//! 船舶按连续时间 Poisson 过程到达；卡车按 tick 分批到达，
//! 高峰时段内到达率上调。

use rand::Rng;
use tracing::debug;

use crate::draw::Draws;
use crate::error::DrawError;
use crate::sim::{Calendar, PeakWindow, SimTime};

/// 速率为 `rate_per_hour` 的 Poisson 过程的到达时刻，
/// 严格落在 `[0, horizon)` 内，非递减。
pub fn poisson_process<R: Rng>(
    draws: &mut Draws<R>,
    rate_per_hour: f64,
    horizon: SimTime,
) -> Result<Vec<SimTime>, DrawError> {
    let mut out = Vec::new();
    if rate_per_hour == 0.0 {
        return Ok(out);
    }
    let mut clock = SimTime::ZERO;
    loop {
        let gap = draws.exponential(rate_per_hour)?;
        clock += SimTime::from_hours_f64(gap);
        if clock >= horizon {
            break;
        }
        out.push(clock);
    }
    debug!(arrivals = out.len(), rate_per_hour, "Poisson 到达过程已生成");
    Ok(out)
}

/// 单个 tick 内的到达数，时间戳为 tick 起点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickCount {
    pub start: SimTime,
    pub count: u64,
}

/// 按 tick 的 Poisson 到达，带时段性高峰
#[derive(Debug, Clone)]
pub struct TickArrivals {
    pub tick: SimTime,
    /// 非高峰时段每个 tick 的期望到达数
    pub base_rate: f64,
    pub surge_factor: f64,
    pub peak_hours: Vec<PeakWindow>,
}

impl TickArrivals {
    pub fn is_peak(&self, hour: u32) -> bool {
        self.peak_hours.iter().any(|w| w.contains(hour))
    }

    pub fn rate_at(&self, hour: u32) -> f64 {
        if self.is_peak(hour) {
            self.base_rate * self.surge_factor
        } else {
            self.base_rate
        }
    }

    /// 为起点是 `start` 的 tick 抽取一次 Poisson 计数
    pub fn draw_tick<R: Rng>(
        &self,
        draws: &mut Draws<R>,
        calendar: &Calendar,
        start: SimTime,
    ) -> Result<TickCount, DrawError> {
        let count = draws.poisson(self.rate_at(calendar.hour_of(start)))?;
        Ok(TickCount { start, count })
    }

    /// 起点落在 `[0, horizon)` 内的所有 tick 的计数
    pub fn generate<R: Rng>(
        &self,
        draws: &mut Draws<R>,
        calendar: &Calendar,
        horizon: SimTime,
    ) -> Result<Vec<TickCount>, DrawError> {
        let mut out = Vec::new();
        if self.tick == SimTime::ZERO {
            return Ok(out);
        }
        let mut start = SimTime::ZERO;
        while start < horizon {
            out.push(self.draw_tick(draws, calendar, start)?);
            start += self.tick;
        }
        Ok(out)
    }
}
