//! 時間窗判斷。
//!
//! 兩個純函式：開盤判斷與裝置作息判斷，不持有任何狀態，
//! 由各迴圈在自己的節拍上呼叫。

use chrono::{DateTime, Local, Timelike};

use crate::{
    config,
    util::datetime::{minutes_of_day, Weekend},
};

/// 判斷目前是否在交易時段內。
///
/// 規則：週一到週五，且 `開盤時刻 <= 現在 < 收盤時刻`。
/// 兩個邊界都以「自午夜起的分鐘數」比較，開盤分與收盤分都生效；
/// 開盤那一分鐘算開盤中，收盤那一分鐘起算收盤。
pub fn is_market_open(now: &DateTime<Local>, schedule: &config::Schedule) -> bool {
    if now.is_weekend() {
        return false;
    }

    let time = minutes_of_day(now);
    let open = schedule.market_open_hour * 60 + schedule.market_open_minute;
    let close = schedule.market_close_hour * 60 + schedule.market_close_minute;

    open <= time && time < close
}

/// 判斷裝置目前是否在作息時段內（要不要抓取與顯示）。
///
/// 規則：`作息起始小時 <= 現在小時 < 作息結束小時`，只看小時。
pub fn is_display_active(now: &DateTime<Local>, schedule: &config::Schedule) -> bool {
    schedule.active_start_hour <= now.hour() && now.hour() < schedule.active_end_hour
}
