//! 码头设备的维护日历

use rand::Rng;
use tracing::info;

use crate::draw::Draws;
use crate::error::PortSimError;
use crate::maintenance::{MaintenanceEvent, MaintenanceScheduler};
use crate::sim::{Calendar, PortConfig, SimTime};

pub fn maintenance_scheduler(
    cfg: &PortConfig,
    calendar: &Calendar,
) -> Result<MaintenanceScheduler, PortSimError> {
    let m = &cfg.maintenance;
    Ok(MaintenanceScheduler {
        calendar: *calendar,
        horizon: cfg.horizon(),
        week_anchor: m.anchor_weekday()?,
        weekly_duration: SimTime::from_hours_f64(m.weekly_hours),
        monthly_duration: SimTime::from_hours_f64(m.monthly_hours),
        monthly_events: m.monthly_events,
    })
}

/// 起重机每周计划维护；固定设施每月纠正性维护
#[tracing::instrument(skip_all)]
pub fn simulate_maintenance<R: Rng>(
    cfg: &PortConfig,
    draws: &mut Draws<R>,
    calendar: &Calendar,
) -> Result<Vec<MaintenanceEvent>, PortSimError> {
    let scheduler = maintenance_scheduler(cfg, calendar)?;
    let mut weekly = cfg.fleet.quay_names();
    weekly.extend(cfg.fleet.yard_names());
    let events = scheduler.schedule(draws, &weekly, &cfg.maintenance.corrective_resources)?;
    info!(events = events.len(), "🔧 维护事件已生成");
    Ok(events)
}
