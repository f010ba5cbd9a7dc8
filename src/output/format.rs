use crate::sim::{Calendar, SimTime};

/// `YYYY-MM-DD HH:MM:SS.fff`
pub fn format_timestamp(calendar: &Calendar, t: SimTime) -> String {
    calendar.at(t).format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}

/// `D days HH:MM:SS.fff`，四舍五入到毫秒
pub fn format_duration(d: SimTime) -> String {
    let ms = d.0.saturating_add(500_000) / 1_000_000;
    let days = ms / 86_400_000;
    let h = ms / 3_600_000 % 24;
    let m = ms / 60_000 % 60;
    let s = ms / 1_000 % 60;
    let frac = ms % 1_000;
    format!("{days} days {h:02}:{m:02}:{s:02}.{frac:03}")
}
