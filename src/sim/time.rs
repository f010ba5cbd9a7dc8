//! 仿真时间类型
//!
//! `SimTime` 以纳秒计自时域起点的时间，同时用于时刻和时长。运算饱和而不回绕。

use std::ops::{Add, AddAssign, Sub};

pub(crate) const NANOS_PER_SEC: u64 = 1_000_000_000;
pub(crate) const NANOS_PER_MIN: u64 = 60 * NANOS_PER_SEC;
pub(crate) const NANOS_PER_HOUR: u64 = 60 * NANOS_PER_MIN;
pub(crate) const NANOS_PER_DAY: u64 = 24 * NANOS_PER_HOUR;

/// 仿真时间（纳秒）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct SimTime(pub u64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0);
    pub const MAX: SimTime = SimTime(u64::MAX);

    pub fn from_millis(ms: u64) -> SimTime {
        SimTime(ms.saturating_mul(1_000_000))
    }
    pub fn from_secs(s: u64) -> SimTime {
        SimTime(s.saturating_mul(NANOS_PER_SEC))
    }
    pub fn from_mins(m: u64) -> SimTime {
        SimTime(m.saturating_mul(NANOS_PER_MIN))
    }
    pub fn from_hours(h: u64) -> SimTime {
        SimTime(h.saturating_mul(NANOS_PER_HOUR))
    }
    pub fn from_days(d: u64) -> SimTime {
        SimTime(d.saturating_mul(NANOS_PER_DAY))
    }

    /// 负数和 NaN 映射为 0，超出范围映射为 `MAX`
    pub fn from_secs_f64(s: f64) -> SimTime {
        from_nanos_f64(s * NANOS_PER_SEC as f64)
    }
    pub fn from_mins_f64(m: f64) -> SimTime {
        from_nanos_f64(m * NANOS_PER_MIN as f64)
    }
    pub fn from_hours_f64(h: f64) -> SimTime {
        from_nanos_f64(h * NANOS_PER_HOUR as f64)
    }

    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_SEC as f64
    }
    pub fn as_hours_f64(self) -> f64 {
        self.0 as f64 / NANOS_PER_HOUR as f64
    }

    pub fn saturating_sub(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_sub(rhs.0))
    }
}

fn from_nanos_f64(n: f64) -> SimTime {
    // `as` 饱和转换：NaN -> 0，负数 -> 0，溢出 -> u64::MAX
    SimTime(n.round() as u64)
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for SimTime {
    fn add_assign(&mut self, rhs: SimTime) {
        *self = *self + rhs;
    }
}

impl Sub for SimTime {
    type Output = SimTime;

    fn sub(self, rhs: SimTime) -> SimTime {
        self.saturating_sub(rhs)
    }
}
