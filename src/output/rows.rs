use super::format::{format_duration, format_timestamp};
use crate::failure::FailureInterval;
use crate::gate::GateEntry;
use crate::maintenance::MaintenanceEvent;
use crate::port::{ContainerMove, EnergyRow, OccupancyRow, VesselCall};
use crate::sim::Calendar;

/// 可渲染为一行 CSV 的记录，按所属表的列顺序
pub trait CsvRow {
    fn cells(&self, calendar: &Calendar) -> Vec<String>;
}

impl CsvRow for VesselCall {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        vec![
            format_timestamp(calendar, self.arrival),
            self.berth.clone(),
            format_duration(self.service),
            u8::from(self.delayed).to_string(),
            format_timestamp(calendar, self.start),
            format_timestamp(calendar, self.end),
        ]
    }
}

impl CsvRow for FailureInterval {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        vec![
            self.resource.clone(),
            format_timestamp(calendar, self.start),
            format_timestamp(calendar, self.end),
        ]
    }
}

impl CsvRow for GateEntry {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        vec![
            format_timestamp(calendar, self.time),
            self.arrivals.to_string(),
            self.num_processed.to_string(),
            self.queue_length.to_string(),
        ]
    }
}

impl CsvRow for ContainerMove {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        vec![
            format_timestamp(calendar, self.container_arrival),
            self.call_id.to_string(),
            self.teu_handled.to_string(),
            self.resource.clone(),
            format_timestamp(calendar, self.move_start),
            format_timestamp(calendar, self.move_end),
        ]
    }
}

impl CsvRow for MaintenanceEvent {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        vec![
            format_timestamp(calendar, self.start),
            self.resource.clone(),
            format_duration(self.duration),
        ]
    }
}

impl CsvRow for OccupancyRow {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.occupancy.len() + 1);
        cells.push(format_timestamp(calendar, self.time));
        cells.extend(self.occupancy.iter().map(|x| format!("{x:.2}")));
        cells
    }
}

impl CsvRow for EnergyRow {
    fn cells(&self, calendar: &Calendar) -> Vec<String> {
        vec![format_timestamp(calendar, self.time), format!("{:.2}", self.kwh)]
    }
}
