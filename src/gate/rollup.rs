use super::queue::QueueTick;
use crate::sim::{Calendar, SimTime};

/// 闸口输出行：截至 `time` 的一小时内的流量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateEntry {
    pub time: SimTime,
    pub arrivals: u64,
    pub num_processed: u64,
    pub queue_length: u64,
}

/// 累加 tick，tick 结束于整点（墙钟时间）时输出一行
#[derive(Debug)]
pub struct HourlyRollup {
    calendar: Calendar,
    arrivals: u64,
    departures: u64,
    rows: Vec<GateEntry>,
}

impl HourlyRollup {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            arrivals: 0,
            departures: 0,
            rows: Vec::new(),
        }
    }

    pub fn push(&mut self, tick: &QueueTick) -> Option<GateEntry> {
        self.arrivals += tick.arrivals;
        self.departures += tick.departures;
        if !self.calendar.is_on_the_hour(tick.time) {
            return None;
        }
        let row = GateEntry {
            time: tick.time,
            arrivals: std::mem::take(&mut self.arrivals),
            num_processed: std::mem::take(&mut self.departures),
            queue_length: tick.queue_length,
        };
        self.rows.push(row);
        Some(row)
    }

    pub fn rows(&self) -> &[GateEntry] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<GateEntry> {
        self.rows
    }
}
