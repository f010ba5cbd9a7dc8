//! 错误类型

use std::path::PathBuf;

use thiserror::Error;

/// 分布参数非法，无法抽样
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DrawError {
    #[error("invalid {distribution} parameter {param} = {value}")]
    InvalidParameter {
        distribution: &'static str,
        param: &'static str,
        value: f64,
    },

    #[error("empty integer range {low}..={high}")]
    EmptyRange { low: u64, high: u64 },

    #[error("cannot sample {amount} distinct values out of {length}")]
    SampleTooLarge { length: usize, amount: usize },
}

#[derive(Debug, Error)]
pub enum PortSimError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("draw error: {0}")]
    Draw(#[from] DrawError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("{} missing columns {missing:?}", file.display())]
    Schema { file: PathBuf, missing: Vec<String> },
}
