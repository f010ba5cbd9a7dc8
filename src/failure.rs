//! 更新过程故障模型
//!
//! 每个可修复资源按 Weibull 间隔发生故障；每次故障停机时长固定，由资源类别决定。

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::draw::Draws;
use crate::error::DrawError;
use crate::sim::SimTime;

/// 抽到的间隔短于上一次停机时长时的处理策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureOverlap {
    /// 时钟按原始间隔推进，相邻区间可能重叠
    #[default]
    Allow,
    /// 短于停机时长的间隔提升到停机时长，区间不重叠
    ClampGap,
}

impl FromStr for FailureOverlap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "allow" => Ok(FailureOverlap::Allow),
            "clamp_gap" | "clamp-gap" => Ok(FailureOverlap::ClampGap),
            other => Err(format!("unknown failure overlap policy: {other} (allow|clamp_gap)")),
        }
    }
}

impl fmt::Display for FailureOverlap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureOverlap::Allow => f.write_str("allow"),
            FailureOverlap::ClampGap => f.write_str("clamp_gap"),
        }
    }
}

/// 单个资源的停机区间 `[start, end)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInterval {
    pub resource: String,
    pub start: SimTime,
    pub end: SimTime,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenewalFailureProcess {
    pub shape: f64,
    pub mean_hours: f64,
    pub overlap: FailureOverlap,
}

impl RenewalFailureProcess {
    pub fn new(shape: f64, mean_hours: f64, overlap: FailureOverlap) -> Self {
        Self {
            shape,
            mean_hours,
            overlap,
        }
    }

    /// `resource` 在 `[0, horizon)` 内开始的故障，按开始时间排序。
    /// 抽取下一个间隔前不把停机时长计入时钟。
    pub fn intervals<R: Rng>(
        &self,
        draws: &mut Draws<R>,
        resource: &str,
        downtime: SimTime,
        horizon: SimTime,
    ) -> Result<Vec<FailureInterval>, DrawError> {
        let mut out = Vec::new();
        let mut clock = SimTime::ZERO;
        loop {
            let mut gap = SimTime::from_hours_f64(draws.weibull_renewal(self.shape, self.mean_hours)?);
            if self.overlap == FailureOverlap::ClampGap {
                gap = gap.max(downtime);
            }
            clock += gap;
            if clock >= horizon {
                break;
            }
            out.push(FailureInterval {
                resource: resource.to_string(),
                start: clock,
                end: clock + downtime,
            });
        }
        debug!(resource, failures = out.len(), "故障序列已生成");
        Ok(out)
    }
}
