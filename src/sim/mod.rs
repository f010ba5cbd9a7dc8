//! 仿真时钟与运行配置
//!
//! `SimTime` 是所有生成器共用的唯一时间表示；`Calendar` 把它映射为墙钟时间戳。

mod calendar;
mod config;
mod time;

pub use calendar::Calendar;
pub use config::{
    ClampedNormal, ContainerConfig, CraneConfig, EnergyConfig, FleetConfig, GateConfig,
    MaintenanceConfig, OccupancyConfig, PeakWindow, PortConfig, UniformRange, VesselConfig,
};
pub use time::SimTime;
