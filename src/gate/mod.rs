//! 闸口队列
//!
//! 单闸口按 FIFO 服务卡车，以固定 tick 推进。`HourlyRollup` 把逐 tick 记录汇总为输出的小时行。

mod queue;
mod rollup;

pub use queue::{GateQueue, GateState, QueueTick, Truck};
pub use rollup::{GateEntry, HourlyRollup};
