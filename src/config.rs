use std::{env, path::PathBuf, str::FromStr};

use anyhow::Result;
use config::{Config as config_config, File as config_file};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::logging;

const CONFIG_PATH: &str = "app.json";

/// 整個裝置的設定，啟動時讀取一次後不再變動
#[derive(Serialize, Deserialize, Default, Debug, Clone)]
pub struct App {
    #[serde(default)]
    pub ticker: Ticker,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub display: Display,
}

const TICKER_SYMBOLS: &str = "TICKER_SYMBOLS";
const TICKER_QUOTE_URL: &str = "TICKER_QUOTE_URL";

/// 要追蹤的股票與報價頁的位置
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Ticker {
    /// 顯示順序即設定順序
    pub symbols: Vec<String>,
    /// 報價頁網址樣板，`{symbol}` 會被股票代號取代
    pub quote_url: String,
}

impl Default for Ticker {
    fn default() -> Self {
        Ticker {
            symbols: vec![
                "AAPL".to_string(),
                "MSFT".to_string(),
                "IBM".to_string(),
                "KO".to_string(),
            ],
            quote_url: "https://quote.example.com/m/quote?symbol={symbol}".to_string(),
        }
    }
}

const MARKET_OPEN_HOUR: &str = "MARKET_OPEN_HOUR";
const MARKET_OPEN_MINUTE: &str = "MARKET_OPEN_MINUTE";
const MARKET_CLOSE_HOUR: &str = "MARKET_CLOSE_HOUR";
const MARKET_CLOSE_MINUTE: &str = "MARKET_CLOSE_MINUTE";
const ACTIVE_START_HOUR: &str = "ACTIVE_START_HOUR";
const ACTIVE_END_HOUR: &str = "ACTIVE_END_HOUR";
const FETCH_INTERVAL_MILLIS: &str = "FETCH_INTERVAL_MILLIS";
const FETCH_TIMEOUT_SECONDS: &str = "FETCH_TIMEOUT_SECONDS";

/// 開收盤時間與裝置作息時段
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Schedule {
    pub market_open_hour: u32,
    pub market_open_minute: u32,
    pub market_close_hour: u32,
    pub market_close_minute: u32,
    /// 裝置每天開始抓取與顯示的小時
    pub active_start_hour: u32,
    /// 裝置每天停止抓取與顯示的小時
    pub active_end_hour: u32,
    pub fetch_interval_millis: u64,
    pub fetch_timeout_seconds: u64,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            market_open_hour: 9,
            market_open_minute: 30,
            market_close_hour: 16,
            market_close_minute: 0,
            active_start_hour: 7,
            active_end_hour: 22,
            fetch_interval_millis: 15_000,
            fetch_timeout_seconds: 10,
        }
    }
}

const DISPLAY_WIDTH: &str = "DISPLAY_WIDTH";
const SCROLL_INTERVAL_MILLIS: &str = "SCROLL_INTERVAL_MILLIS";
const BANNER_PERIOD: &str = "BANNER_PERIOD";
const DISPLAY_PLACEHOLDER: &str = "DISPLAY_PLACEHOLDER";
const DISPLAY_SEPARATOR: &str = "DISPLAY_SEPARATOR";

/// 跑馬燈顯示相關設定
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Display {
    /// 顯示器一次能呈現的字元數
    pub width: usize,
    pub scroll_interval_millis: u64,
    /// 每幾檔報價插入一次日期時間看板
    pub banner_period: usize,
    /// 報價尚未就緒時顯示的文字
    pub placeholder: String,
    /// 段落與段落之間的分隔文字
    pub separator: String,
}

impl Default for Display {
    fn default() -> Self {
        Display {
            width: 16,
            scroll_interval_millis: 250,
            banner_period: 4,
            placeholder: "updating ...".to_string(),
            separator: "     ".to_string(),
        }
    }
}

pub static SETTINGS: Lazy<App> = Lazy::new(|| App::get().expect("Config error"));

impl App {
    fn get() -> Result<Self> {
        let config_path = config_path();
        if config_path.exists() {
            let config: App = config_config::builder()
                .add_source(config_file::from(config_path))
                .build()?
                .try_deserialize()?;
            return Ok(config.override_with_env());
        }

        Ok(App::from_env())
    }

    /// 從 env 中讀取設定值，沒有設定檔時以預設值起家
    fn from_env() -> Self {
        App::default().override_with_env()
    }

    /// 將來至於 env 的設定值覆蓋掉 json 上的設定值
    fn override_with_env(mut self) -> Self {
        if let Ok(symbols) = env::var(TICKER_SYMBOLS) {
            let list: Vec<String> = symbols
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if !list.is_empty() {
                self.ticker.symbols = list;
            } else {
                logging::error_file_async(format!(
                    "Failed to parse {} because it contains no symbols: {}",
                    TICKER_SYMBOLS, symbols
                ));
            }
        }

        if let Ok(url) = env::var(TICKER_QUOTE_URL) {
            self.ticker.quote_url = url;
        }

        if let Ok(hour) = env::var(MARKET_OPEN_HOUR) {
            self.schedule.market_open_hour =
                u32::from_str(&hour).unwrap_or(self.schedule.market_open_hour);
        }

        if let Ok(minute) = env::var(MARKET_OPEN_MINUTE) {
            self.schedule.market_open_minute =
                u32::from_str(&minute).unwrap_or(self.schedule.market_open_minute);
        }

        if let Ok(hour) = env::var(MARKET_CLOSE_HOUR) {
            self.schedule.market_close_hour =
                u32::from_str(&hour).unwrap_or(self.schedule.market_close_hour);
        }

        if let Ok(minute) = env::var(MARKET_CLOSE_MINUTE) {
            self.schedule.market_close_minute =
                u32::from_str(&minute).unwrap_or(self.schedule.market_close_minute);
        }

        if let Ok(hour) = env::var(ACTIVE_START_HOUR) {
            self.schedule.active_start_hour =
                u32::from_str(&hour).unwrap_or(self.schedule.active_start_hour);
        }

        if let Ok(hour) = env::var(ACTIVE_END_HOUR) {
            self.schedule.active_end_hour =
                u32::from_str(&hour).unwrap_or(self.schedule.active_end_hour);
        }

        if let Ok(millis) = env::var(FETCH_INTERVAL_MILLIS) {
            self.schedule.fetch_interval_millis =
                u64::from_str(&millis).unwrap_or(self.schedule.fetch_interval_millis);
        }

        if let Ok(seconds) = env::var(FETCH_TIMEOUT_SECONDS) {
            self.schedule.fetch_timeout_seconds =
                u64::from_str(&seconds).unwrap_or(self.schedule.fetch_timeout_seconds);
        }

        if let Ok(width) = env::var(DISPLAY_WIDTH) {
            self.display.width = usize::from_str(&width).unwrap_or(self.display.width);
        }

        if let Ok(millis) = env::var(SCROLL_INTERVAL_MILLIS) {
            self.display.scroll_interval_millis =
                u64::from_str(&millis).unwrap_or(self.display.scroll_interval_millis);
        }

        if let Ok(period) = env::var(BANNER_PERIOD) {
            self.display.banner_period =
                usize::from_str(&period).unwrap_or(self.display.banner_period);
        }

        if let Ok(placeholder) = env::var(DISPLAY_PLACEHOLDER) {
            self.display.placeholder = placeholder;
        }

        if let Ok(separator) = env::var(DISPLAY_SEPARATOR) {
            self.display.separator = separator;
        }

        self
    }
}

/// 回傳設定檔的路徑
fn config_path() -> PathBuf {
    PathBuf::from(CONFIG_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = App::default();

        assert!(!app.ticker.symbols.is_empty());
        assert_eq!(app.schedule.market_open_hour, 9);
        assert_eq!(app.schedule.market_open_minute, 30);
        assert_eq!(app.schedule.market_close_hour, 16);
        assert!(app.schedule.active_start_hour < app.schedule.active_end_hour);
        assert!(app.display.width > 0);
        assert!(app.display.banner_period > 0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let app: App = serde_json::from_str(r#"{"display": {"width": 24}}"#)
            .expect("partial config should deserialize");

        assert_eq!(app.display.width, 24);
        // 其餘欄位回落到預設值
        assert_eq!(app.display.banner_period, Display::default().banner_period);
        assert_eq!(
            app.schedule.fetch_interval_millis,
            Schedule::default().fetch_interval_millis
        );
        assert_eq!(app.ticker.symbols, Ticker::default().symbols);
    }
}
