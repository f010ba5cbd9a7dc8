use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::PortSimError;

/// 单张输出表的列约定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub file_name: &'static str,
    pub columns: &'static [&'static str],
}

pub const VESSEL_TURNAROUND: TableSchema = TableSchema {
    name: "vessel_turnaround",
    file_name: "vessel_turnaround.csv",
    columns: &["arrival_time", "berth", "service_time", "delay_flag", "start_time", "end_time"],
};

pub const CRANE_UPTIME: TableSchema = TableSchema {
    name: "crane_uptime",
    file_name: "crane_uptime.csv",
    columns: &["resource_name", "downtime_start", "downtime_end"],
};

pub const GATE_ENTRIES: TableSchema = TableSchema {
    name: "gate_entries",
    file_name: "gate_entries.csv",
    columns: &["time", "arrivals", "num_processed", "queue_length"],
};

pub const CONTAINER_MOVES: TableSchema = TableSchema {
    name: "container_moves",
    file_name: "container_moves.csv",
    columns: &["container_arrival", "call_id", "teu_handled", "resource_assigned", "move_start", "move_end"],
};

pub const MAINTENANCE_EVENTS: TableSchema = TableSchema {
    name: "maintenance_events",
    file_name: "maintenance_events.csv",
    columns: &["time", "resource", "maintenance_duration"],
};

/// 默认泊位名单对应的列；使用其他泊位时改由名单生成列
/// （见 `PortLogs::required_columns`）。
pub const BERTH_OCCUPANCY: TableSchema = TableSchema {
    name: "berth_occupancy",
    file_name: "berth_occupancy.csv",
    columns: &["time", "MP1", "MP2", "MP3", "MP4", "CT1", "CT2"],
};

pub const ENERGY_CONSUMPTION: TableSchema = TableSchema {
    name: "energy_consumption",
    file_name: "energy_consumption.csv",
    columns: &["time", "energy_kWh"],
};

pub const ALL_TABLES: [TableSchema; 7] = [
    BERTH_OCCUPANCY,
    VESSEL_TURNAROUND,
    CONTAINER_MOVES,
    CRANE_UPTIME,
    GATE_ENTRIES,
    ENERGY_CONSUMPTION,
    MAINTENANCE_EVENTS,
];

/// `header` 中缺失的 `required` 列，按 `required` 顺序
pub fn missing_columns<S: AsRef<str>>(header: &[S], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|col| !header.iter().any(|h| h.as_ref() == **col))
        .map(|col| col.to_string())
        .collect()
}

/// 读取 CSV 文件首行的列名
pub fn read_header(path: &Path) -> Result<Vec<String>, PortSimError> {
    let mut line = String::new();
    BufReader::new(File::open(path)?).read_line(&mut line)?;
    Ok(line
        .trim_end_matches(['\r', '\n'])
        .split(',')
        .map(|c| c.trim().trim_matches('"').to_string())
        .filter(|c| !c.is_empty())
        .collect())
}

pub fn verify_columns(path: &Path, required: &[&str]) -> Result<(), PortSimError> {
    let header = read_header(path)?;
    let missing = missing_columns(&header, required);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(PortSimError::Schema {
            file: path.to_path_buf(),
            missing,
        })
    }
}

pub fn verify_header(path: &Path, schema: &TableSchema) -> Result<(), PortSimError> {
    verify_columns(path, schema.columns)
}
