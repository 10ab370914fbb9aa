use chrono::{DateTime, Datelike, Local, Timelike, Weekday};

/// A trait representing the weekend concept.
pub trait Weekend {
    /// Determines if a given date is a weekend.
    ///
    /// Returns `true` if the date is on a Saturday or Sunday, and `false` otherwise.
    fn is_weekend(&self) -> bool;
}

impl Weekend for DateTime<Local> {
    /// Treats Saturday and Sunday as weekends.
    fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// Returns the number of minutes elapsed since midnight for the given time.
///
/// Used for time-of-day window comparisons where both the hour and the
/// minute take part in the boundary.
pub fn minutes_of_day(time: &DateTime<Local>) -> u32 {
    time.hour() * 60 + time.minute()
}

/// 提供目前時間的介面，讓排程與跑馬燈邏輯可以在測試中換成固定時鐘
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

/// 系統時鐘
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
