//! 港口码头生成器
//!
//! 每张输出表对应一个生成器；[`run_all`] 在各自独立的随机流上依次运行它们。

mod containers;
mod cranes;
mod energy;
mod gate;
mod occupancy;
mod run;
mod upkeep;
mod vessels;

pub use containers::{ContainerMove, call_teu, crane_pool, move_duration, simulate_container_moves};
pub use cranes::simulate_crane_failures;
pub use energy::{EnergyRow, energy_profile, hourly_kwh};
pub use gate::{GateLog, simulate_gate, truck_arrivals};
pub use occupancy::{OccupancyRow, simulate_berth_occupancy};
pub use run::{PortLogs, run_all};
pub use upkeep::{maintenance_scheduler, simulate_maintenance};
pub use vessels::{HOURS_PER_YEAR, VesselCall, simulate_vessels, vessel_service};
