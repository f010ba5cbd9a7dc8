use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

use super::calendar::Calendar;
use super::time::{NANOS_PER_DAY, SimTime};
use crate::error::PortSimError;
use crate::failure::FailureOverlap;

/// 顶层运行配置。每个字段都有默认值，`{}` 即为基准码头全年的完整配置。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PortConfig {
    pub seed: u64,
    /// `YYYY-MM-DD` 或 `YYYY-MM-DD HH:MM:SS`
    pub start: String,
    pub horizon_days: u64,
    pub fleet: FleetConfig,
    pub vessels: VesselConfig,
    pub containers: ContainerConfig,
    pub cranes: CraneConfig,
    pub gate: GateConfig,
    pub maintenance: MaintenanceConfig,
    pub berth_occupancy: OccupancyConfig,
    pub energy: EnergyConfig,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            start: "2025-01-01 00:00:00".to_string(),
            horizon_days: 365,
            fleet: FleetConfig::default(),
            vessels: VesselConfig::default(),
            containers: ContainerConfig::default(),
            cranes: CraneConfig::default(),
            gate: GateConfig::default(),
            maintenance: MaintenanceConfig::default(),
            berth_occupancy: OccupancyConfig::default(),
            energy: EnergyConfig::default(),
        }
    }
}

/// 下限为 `floor` 的正态抽样，单位由所属字段名决定
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ClampedNormal {
    pub mean: f64,
    pub stdev: f64,
    pub floor: f64,
}

impl ClampedNormal {
    pub const fn new(mean: f64, stdev: f64, floor: f64) -> Self {
        Self { mean, stdev, floor }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct UniformRange {
    pub low: f64,
    pub high: f64,
}

/// 墙钟小时的闭区间，例如 `8..=10` 覆盖 08:00 到 10:59
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PeakWindow {
    pub start_hour: u32,
    pub end_hour: u32,
}

impl PeakWindow {
    pub const fn new(start_hour: u32, end_hour: u32) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    pub fn contains(&self, hour: u32) -> bool {
        self.start_hour <= hour && hour <= self.end_hour
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FleetConfig {
    pub berths: Vec<String>,
    pub quay_cranes: usize,
    pub yard_cranes: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            berths: ["MP1", "MP2", "MP3", "MP4", "CT1", "CT2"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            quay_cranes: 6,
            yard_cranes: 14,
        }
    }
}

impl FleetConfig {
    pub fn quay_names(&self) -> Vec<String> {
        (1..=self.quay_cranes).map(|i| format!("Quay{i}")).collect()
    }

    pub fn yard_names(&self) -> Vec<String> {
        (1..=self.yard_cranes).map(|i| format!("Yard{i}")).collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VesselConfig {
    pub calls_per_year: f64,
    pub service_hours: ClampedNormal,
    pub delay_probability: f64,
    pub delay_extra_hours: UniformRange,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            calls_per_year: 1200.0,
            service_hours: ClampedNormal::new(23.0, 4.5, 1.0),
            delay_probability: 0.11,
            delay_extra_hours: UniformRange {
                low: 0.5,
                high: 3.0,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContainerConfig {
    pub moves_per_call: f64,
    pub teu_per_call: ClampedNormal,
    pub call_capacity_teu: u64,
    pub quay_move_secs: ClampedNormal,
    pub yard_move_secs: ClampedNormal,
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            moves_per_call: 2.6,
            teu_per_call: ClampedNormal::new(1400.0, 100.0, 1.0),
            call_capacity_teu: 1500,
            quay_move_secs: ClampedNormal::new(90.0, 10.0, 20.0),
            yard_move_secs: ClampedNormal::new(144.0, 15.0, 30.0),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CraneConfig {
    pub weibull_shape: f64,
    pub mean_hours_between_failures: f64,
    pub quay_downtime_hours: f64,
    pub yard_downtime_hours: f64,
    pub overlap: FailureOverlap,
}

impl Default for CraneConfig {
    fn default() -> Self {
        Self {
            weibull_shape: 1.7,
            mean_hours_between_failures: 12.0,
            quay_downtime_hours: 1.2,
            yard_downtime_hours: 1.0,
            overlap: FailureOverlap::Allow,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GateConfig {
    pub trucks_per_day: f64,
    pub tick_minutes: u64,
    pub surge_factor: f64,
    pub peak_hours: Vec<PeakWindow>,
    pub service_mins: ClampedNormal,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            trucks_per_day: 160.0,
            tick_minutes: 15,
            surge_factor: 1.28,
            peak_hours: vec![PeakWindow::new(8, 10), PeakWindow::new(17, 19)],
            service_mins: ClampedNormal::new(11.0, 2.5, 6.0),
        }
    }
}

impl GateConfig {
    pub fn tick(&self) -> SimTime {
        SimTime::from_mins(self.tick_minutes)
    }

    /// 非高峰时段单个 tick 的期望到达数
    pub fn base_rate_per_tick(&self) -> f64 {
        self.trucks_per_day * self.tick_minutes as f64 / (24.0 * 60.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MaintenanceConfig {
    pub weekly_hours: f64,
    pub monthly_hours: f64,
    /// 每周起始日相对周一的天数（6 = 周日）
    pub week_anchor: u8,
    pub monthly_events: usize,
    pub corrective_resources: Vec<String>,
}

impl Default for MaintenanceConfig {
    fn default() -> Self {
        Self {
            weekly_hours: 3.5,
            monthly_hours: 4.5,
            week_anchor: 6,
            monthly_events: 3,
            corrective_resources: ["MP1", "MP2", "MP3", "MP4", "CT1", "CT2", "Convey1", "Light1"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl MaintenanceConfig {
    pub fn anchor_weekday(&self) -> Result<Weekday, PortSimError> {
        Weekday::try_from(self.week_anchor).map_err(|_| {
            PortSimError::InvalidConfig(format!(
                "maintenance.week_anchor must be 0..=6, got {}",
                self.week_anchor
            ))
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OccupancyConfig {
    pub base_mean: f64,
    pub stdev: f64,
    pub monsoon_dip: f64,
    pub monsoon_months: Vec<u32>,
    pub winter_peak: f64,
    pub winter_months: Vec<u32>,
}

impl Default for OccupancyConfig {
    fn default() -> Self {
        Self {
            base_mean: 0.78,
            stdev: 0.05,
            monsoon_dip: 0.14,
            monsoon_months: vec![7, 8, 9],
            winter_peak: 0.09,
            winter_months: vec![12, 1, 2],
        }
    }
}

impl OccupancyConfig {
    pub fn mean_for_month(&self, month: u32) -> f64 {
        if self.monsoon_months.contains(&month) {
            self.base_mean - self.monsoon_dip
        } else if self.winter_months.contains(&month) {
            self.base_mean + self.winter_peak
        } else {
            self.base_mean
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnergyConfig {
    pub base_kwh: f64,
    pub overhead: f64,
    pub peak_factor: f64,
    pub peak_hours: PeakWindow,
    pub summer_factor: f64,
    pub summer_months: Vec<u32>,
    pub winter_factor: f64,
    pub winter_months: Vec<u32>,
}

impl Default for EnergyConfig {
    fn default() -> Self {
        Self {
            base_kwh: 6500.0,
            overhead: 0.06,
            peak_factor: 1.27,
            peak_hours: PeakWindow::new(8, 18),
            summer_factor: 1.17,
            summer_months: vec![6, 7, 8],
            winter_factor: 0.83,
            winter_months: vec![12, 1, 2],
        }
    }
}

impl PortConfig {
    pub fn from_json(raw: &str) -> Result<Self, PortSimError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn horizon(&self) -> SimTime {
        SimTime::from_days(self.horizon_days)
    }

    pub fn calendar(&self) -> Result<Calendar, PortSimError> {
        Ok(Calendar::new(parse_start(&self.start)?))
    }

    /// 拒绝生成器无法使用的参数；在消耗任何随机数之前执行。
    pub fn validate(&self) -> Result<(), PortSimError> {
        let start = self.calendar()?.start();
        self.maintenance.anchor_weekday()?;

        if self.horizon_days == 0 {
            return Err(invalid("horizon_days must be positive"));
        }
        if self.horizon_days.checked_mul(NANOS_PER_DAY).is_none() {
            return Err(invalid(format!(
                "horizon_days {} exceeds the {} days a nanosecond clock can hold",
                self.horizon_days,
                u64::MAX / NANOS_PER_DAY
            )));
        }
        if self.fleet.berths.is_empty() {
            return Err(invalid("fleet.berths must not be empty"));
        }
        if self.fleet.quay_cranes + self.fleet.yard_cranes == 0 {
            return Err(invalid("fleet needs at least one quay or yard crane"));
        }

        non_negative("vessels.calls_per_year", self.vessels.calls_per_year)?;
        normal("vessels.service_hours", &self.vessels.service_hours)?;
        probability("vessels.delay_probability", self.vessels.delay_probability)?;
        range("vessels.delay_extra_hours", &self.vessels.delay_extra_hours)?;

        non_negative("containers.moves_per_call", self.containers.moves_per_call)?;
        normal("containers.teu_per_call", &self.containers.teu_per_call)?;
        normal("containers.quay_move_secs", &self.containers.quay_move_secs)?;
        normal("containers.yard_move_secs", &self.containers.yard_move_secs)?;
        if self.containers.call_capacity_teu == 0 {
            return Err(invalid("containers.call_capacity_teu must be positive"));
        }

        positive("cranes.weibull_shape", self.cranes.weibull_shape)?;
        positive("cranes.mean_hours_between_failures", self.cranes.mean_hours_between_failures)?;
        non_negative("cranes.quay_downtime_hours", self.cranes.quay_downtime_hours)?;
        non_negative("cranes.yard_downtime_hours", self.cranes.yard_downtime_hours)?;

        non_negative("gate.trucks_per_day", self.gate.trucks_per_day)?;
        non_negative("gate.surge_factor", self.gate.surge_factor)?;
        normal("gate.service_mins", &self.gate.service_mins)?;
        if self.gate.tick_minutes == 0 || 60 % self.gate.tick_minutes != 0 {
            return Err(invalid(format!(
                "gate.tick_minutes must divide an hour, got {}",
                self.gate.tick_minutes
            )));
        }
        if start.second() != 0
            || start.nanosecond() != 0
            || u64::from(start.minute()) % self.gate.tick_minutes != 0
        {
            return Err(invalid(format!(
                "start {} is not aligned to the {}-minute gate tick",
                self.start, self.gate.tick_minutes
            )));
        }
        for w in &self.gate.peak_hours {
            hours("gate.peak_hours", w)?;
        }

        non_negative("maintenance.weekly_hours", self.maintenance.weekly_hours)?;
        non_negative("maintenance.monthly_hours", self.maintenance.monthly_hours)?;
        if self.maintenance.monthly_events > 28 {
            return Err(invalid("maintenance.monthly_events cannot exceed 28 distinct days"));
        }

        non_negative("berth_occupancy.stdev", self.berth_occupancy.stdev)?;
        finite("berth_occupancy.base_mean", self.berth_occupancy.base_mean)?;
        non_negative("energy.base_kwh", self.energy.base_kwh)?;
        hours("energy.peak_hours", &self.energy.peak_hours)?;
        Ok(())
    }
}

fn parse_start(raw: &str) -> Result<NaiveDateTime, PortSimError> {
    let raw = raw.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Ok(ts);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN))
        .map_err(|_| invalid(format!("start must be YYYY-MM-DD[ HH:MM:SS], got {raw:?}")))
}

fn invalid(msg: impl Into<String>) -> PortSimError {
    PortSimError::InvalidConfig(msg.into())
}

fn finite(name: &str, v: f64) -> Result<(), PortSimError> {
    if v.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be finite, got {v}")))
    }
}

fn non_negative(name: &str, v: f64) -> Result<(), PortSimError> {
    finite(name, v)?;
    if v < 0.0 {
        return Err(invalid(format!("{name} must be >= 0, got {v}")));
    }
    Ok(())
}

fn positive(name: &str, v: f64) -> Result<(), PortSimError> {
    finite(name, v)?;
    if v <= 0.0 {
        return Err(invalid(format!("{name} must be > 0, got {v}")));
    }
    Ok(())
}

fn probability(name: &str, p: f64) -> Result<(), PortSimError> {
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in [0, 1], got {p}")))
    }
}

fn normal(name: &str, n: &ClampedNormal) -> Result<(), PortSimError> {
    finite(name, n.mean)?;
    finite(name, n.floor)?;
    non_negative(name, n.stdev)
}

fn range(name: &str, r: &UniformRange) -> Result<(), PortSimError> {
    finite(name, r.low)?;
    finite(name, r.high)?;
    if r.low > r.high {
        return Err(invalid(format!("{name}: low {} > high {}", r.low, r.high)));
    }
    Ok(())
}

fn hours(name: &str, w: &PeakWindow) -> Result<(), PortSimError> {
    if w.start_hour > w.end_hour || w.end_hour > 23 {
        return Err(invalid(format!(
            "{name}: window {}..={} is not within 0..=23",
            w.start_hour, w.end_hour
        )));
    }
    Ok(())
}
