//! 周期性维护
//!
//! 两条日历规则：起重机每周计划维护（每个资源固定的日偏移），
//! 固定设施每月若干次纠正性维护。
//! 随机计划的抽取与展开为事件是两个独立步骤，同一计划总是展开为相同的事件。

use chrono::Weekday;
use rand::Rng;
use tracing::debug;

use crate::draw::Draws;
use crate::error::DrawError;
use crate::sim::{Calendar, SimTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaintenanceClass {
    WeeklyPlanned,
    MonthlyCorrective,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaintenanceEvent {
    pub resource: String,
    pub start: SimTime,
    pub duration: SimTime,
    pub class: MaintenanceClass,
}

/// 资源在每一周使用的日偏移（0..=6）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPlan {
    pub resource: String,
    pub day_offset: u64,
}

/// 某资源某月选中的日期（月内从 0 计）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthlyPlan {
    pub resource: String,
    pub month_start: SimTime,
    pub days: Vec<u64>,
}

#[derive(Debug, Clone)]
pub struct MaintenanceScheduler {
    pub calendar: Calendar,
    pub horizon: SimTime,
    pub week_anchor: Weekday,
    pub weekly_duration: SimTime,
    pub monthly_duration: SimTime,
    pub monthly_events: usize,
}

impl MaintenanceScheduler {
    pub fn week_starts(&self) -> Vec<SimTime> {
        self.calendar.week_starts(self.week_anchor, self.horizon)
    }

    pub fn draw_weekly<R: Rng>(
        &self,
        draws: &mut Draws<R>,
        resources: &[String],
    ) -> Result<Vec<WeeklyPlan>, DrawError> {
        resources
            .iter()
            .map(|r| {
                Ok(WeeklyPlan {
                    resource: r.clone(),
                    day_offset: draws.uniform_int(0, 6)?,
                })
            })
            .collect()
    }

    pub fn draw_monthly<R: Rng>(
        &self,
        draws: &mut Draws<R>,
        resources: &[String],
    ) -> Result<Vec<MonthlyPlan>, DrawError> {
        let months = self.calendar.month_starts(self.horizon);
        let mut plans = Vec::with_capacity(resources.len() * months.len());
        for r in resources {
            for &(month_start, days_in_month) in &months {
                let days = draws
                    .sample_distinct(days_in_month as usize, self.monthly_events)?
                    .into_iter()
                    .map(|d| d as u64)
                    .collect();
                plans.push(MonthlyPlan {
                    resource: r.clone(),
                    month_start,
                    days,
                });
            }
        }
        Ok(plans)
    }

    /// 每个计划在每个周起点各产生一个事件；只要求周起点在时域内，
    /// 加上偏移后的日期可以超出时域。
    pub fn expand_weekly(&self, plans: &[WeeklyPlan]) -> Vec<MaintenanceEvent> {
        let weeks = self.week_starts();
        let mut out = Vec::with_capacity(plans.len() * weeks.len());
        for plan in plans {
            for &week in &weeks {
                out.push(MaintenanceEvent {
                    resource: plan.resource.clone(),
                    start: week + SimTime::from_days(plan.day_offset),
                    duration: self.weekly_duration,
                    class: MaintenanceClass::WeeklyPlanned,
                });
            }
        }
        out
    }

    pub fn expand_monthly(&self, plans: &[MonthlyPlan]) -> Vec<MaintenanceEvent> {
        plans
            .iter()
            .flat_map(|plan| {
                plan.days.iter().map(move |&d| MaintenanceEvent {
                    resource: plan.resource.clone(),
                    start: plan.month_start + SimTime::from_days(d),
                    duration: self.monthly_duration,
                    class: MaintenanceClass::MonthlyCorrective,
                })
            })
            .filter(|e| e.start < self.horizon)
            .collect()
    }

    /// 合并两条规则并按开始时间排序；开始时间相同时周维护在前，其次按计划顺序。
    pub fn expand(&self, weekly: &[WeeklyPlan], monthly: &[MonthlyPlan]) -> Vec<MaintenanceEvent> {
        let mut events = self.expand_weekly(weekly);
        events.extend(self.expand_monthly(monthly));
        events.sort_by_key(|e| e.start);
        events
    }

    pub fn schedule<R: Rng>(
        &self,
        draws: &mut Draws<R>,
        weekly_resources: &[String],
        monthly_resources: &[String],
    ) -> Result<Vec<MaintenanceEvent>, DrawError> {
        let weekly = self.draw_weekly(draws, weekly_resources)?;
        let monthly = self.draw_monthly(draws, monthly_resources)?;
        let events = self.expand(&weekly, &monthly);
        debug!(
            weekly_resources = weekly.len(),
            monthly_plans = monthly.len(),
            events = events.len(),
            "维护计划已展开"
        );
        Ok(events)
    }
}
