//! 由更新过程生成的起重机停机

use rand::Rng;
use tracing::info;

use crate::draw::Draws;
use crate::error::PortSimError;
use crate::failure::{FailureInterval, RenewalFailureProcess};
use crate::sim::{PortConfig, SimTime};

#[tracing::instrument(skip_all, fields(overlap = %cfg.cranes.overlap))]
pub fn simulate_crane_failures<R: Rng>(
    cfg: &PortConfig,
    draws: &mut Draws<R>,
) -> Result<Vec<FailureInterval>, PortSimError> {
    let c = &cfg.cranes;
    let process = RenewalFailureProcess::new(c.weibull_shape, c.mean_hours_between_failures, c.overlap);
    let horizon = cfg.horizon();

    let quay_down = SimTime::from_hours_f64(c.quay_downtime_hours);
    let yard_down = SimTime::from_hours_f64(c.yard_downtime_hours);
    let roster = cfg
        .fleet
        .quay_names()
        .into_iter()
        .map(|n| (n, quay_down))
        .chain(cfg.fleet.yard_names().into_iter().map(|n| (n, yard_down)));

    let mut failures = Vec::new();
    for (name, downtime) in roster {
        failures.extend(process.intervals(draws, &name, downtime, horizon)?);
    }
    // 稳定排序：开始时间相同保持名单顺序
    failures.sort_by_key(|f| f.start);

    info!(failures = failures.len(), "起重机故障仿真完成");
    Ok(failures)
}
