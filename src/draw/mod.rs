//! 随机抽样
//!
//! `Draws` 封装可注入的随机源；`Streams` 为每个生成器分配独立的带种子 `Draws`。

mod draws;
mod streams;

pub use draws::{Draws, gamma, weibull_scale_for_mean};
pub use streams::{Streams, fnv1a64};
