//! 多服务台分配
//!
//! 固定的服务台池（泊位、岸桥、场桥）。每个作业交给最早空闲的服务台，
//! 并列时取池中下标最小者。

mod job;
mod pool;

pub use job::{Assignment, Job, Server, ServerId, ServerKind};
pub use pool::{ServerPool, assign_pure};
