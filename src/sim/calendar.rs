//! 墙钟时间映射
//!
//! 把 `SimTime` 偏移锚定到日历起点，供生成器查询小时、月份，或枚举周/月边界。

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike, Weekday};

use super::time::SimTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    start: NaiveDateTime,
}

impl Calendar {
    pub fn new(start: NaiveDateTime) -> Self {
        Self { start }
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn at(&self, t: SimTime) -> NaiveDateTime {
        let nanos = i64::try_from(t.0).unwrap_or(i64::MAX);
        self.start
            .checked_add_signed(TimeDelta::nanoseconds(nanos))
            .unwrap_or(NaiveDateTime::MAX)
    }

    /// `ts` 相对日历起点的偏移；早于起点的时刻映射为 0
    pub fn offset_of(&self, ts: NaiveDateTime) -> SimTime {
        let nanos = (ts - self.start).num_nanoseconds().unwrap_or(i64::MAX);
        SimTime(u64::try_from(nanos).unwrap_or(0))
    }

    pub fn hour_of(&self, t: SimTime) -> u32 {
        self.at(t).hour()
    }

    pub fn month_of(&self, t: SimTime) -> u32 {
        self.at(t).month()
    }

    /// `t` 恰好落在墙钟整点（`HH:00:00.000`）时为 true
    pub fn is_on_the_hour(&self, t: SimTime) -> bool {
        let ts = self.at(t);
        ts.minute() == 0 && ts.second() == 0 && ts.nanosecond() == 0
    }

    /// `[start, start + horizon)` 内星期为 `anchor` 的零点
    pub fn week_starts(&self, anchor: Weekday, horizon: SimTime) -> Vec<SimTime> {
        let Some(first) = self.first_midnight() else {
            return Vec::new();
        };
        let skip = (7 + anchor.num_days_from_monday() - first.weekday().num_days_from_monday()) % 7;
        let mut out = Vec::new();
        let mut day = first.checked_add_signed(TimeDelta::days(i64::from(skip)));
        while let Some(d) = day {
            let t = self.offset_of(d.and_time(NaiveTime::MIN));
            if t >= horizon {
                break;
            }
            out.push(t);
            day = d.checked_add_signed(TimeDelta::days(7));
        }
        out
    }

    /// `[start, start + horizon)` 内每月 1 日零点，以及该月天数
    pub fn month_starts(&self, horizon: SimTime) -> Vec<(SimTime, u32)> {
        let Some(first) = self.first_midnight() else {
            return Vec::new();
        };
        let mut month = if first.day() == 1 {
            Some(first)
        } else {
            first
                .with_day(1)
                .and_then(|d| d.checked_add_months(Months::new(1)))
        };
        let mut out = Vec::new();
        while let Some(m) = month {
            let t = self.offset_of(m.and_time(NaiveTime::MIN));
            if t >= horizon {
                break;
            }
            let next = m.checked_add_months(Months::new(1));
            let days = next.map_or(31, |n| (n - m).num_days() as u32);
            out.push((t, days));
            month = next;
        }
        out
    }

    fn first_midnight(&self) -> Option<NaiveDate> {
        let date = self.start.date();
        if self.start.time() == NaiveTime::MIN {
            Some(date)
        } else {
            date.succ_opt()
        }
    }
}
