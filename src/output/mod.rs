//! 表格输出
//!
//! 各生成器的记录以扁平 CSV 表输出，表头遵循下游导入方校验的列约定。

mod csv;
mod format;
mod rows;
mod schema;

pub use csv::{escape, write_csv, write_table};
pub use format::{format_duration, format_timestamp};
pub use rows::CsvRow;
pub use schema::{
    ALL_TABLES, BERTH_OCCUPANCY, CONTAINER_MOVES, CRANE_UPTIME, ENERGY_CONSUMPTION, GATE_ENTRIES,
    MAINTENANCE_EVENTS, TableSchema, VESSEL_TURNAROUND, missing_columns, read_header,
    verify_columns, verify_header,
};
