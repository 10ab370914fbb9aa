//! 跑馬燈狀態機。
//!
//! 每個 tick 讓固定寬度的視窗前進一個字元；目前段落播完時，
//! 依儲存區的槽位順序換到下一檔報價，每隔設定的檔數插入一次
//! 日期時間看板。純狀態機，不碰計時器也不碰畫面，由繪製迴圈驅動。

use std::collections::VecDeque;

use concat_string::concat_string;

use crate::{config, declare::QuoteStatus, store::QuoteStore, util::datetime::Clock};

/// 日期時間看板的格式，例： 06/03 09:31
const BANNER_FORMAT: &str = "%m/%d %H:%M";
const INVALID_SYMBOL_TEXT: &str = "Invalid Symbol";

/// 跑馬燈的全部可變狀態，只在開機時重設
pub struct TickerTape {
    /// 固定寬度的滾動視窗
    window: VecDeque<char>,
    /// 正在送入視窗的段落
    segment: Vec<char>,
    /// 段落內的讀取位置
    cursor: usize,
    /// 下一個要顯示的槽位
    quote_index: usize,
    /// 距離上一次看板已播出的報價檔數
    quotes_since_banner: usize,
    banner_period: usize,
    placeholder: String,
    separator: String,
}

impl TickerTape {
    pub fn new(display: &config::Display) -> Self {
        let width = display.width.max(1);

        TickerTape {
            window: std::iter::repeat(' ').take(width).collect(),
            segment: Vec::new(),
            cursor: 0,
            quote_index: 0,
            quotes_since_banner: 0,
            banner_period: display.banner_period.max(1),
            placeholder: display.placeholder.clone(),
            separator: display.separator.clone(),
        }
    }

    /// 前進一個字元並回傳視窗目前的內容。
    ///
    /// 回傳字串的長度恆等於顯示寬度。
    pub fn tick(&mut self, store: &QuoteStore, clock: &dyn Clock) -> String {
        if self.cursor >= self.segment.len() {
            self.load_next_segment(store, clock);
        }

        self.window.pop_front();
        self.window
            .push_back(self.segment.get(self.cursor).copied().unwrap_or(' '));
        self.cursor += 1;

        self.window.iter().collect()
    }

    /// 換到下一個段落：依序是報價、報價…每 `banner_period` 檔插一次看板
    fn load_next_segment(&mut self, store: &QuoteStore, clock: &dyn Clock) {
        self.cursor = 0;

        let text = if store.is_empty() {
            self.placeholder.clone()
        } else if self.quotes_since_banner >= self.banner_period {
            self.quotes_since_banner = 0;
            clock.now().format(BANNER_FORMAT).to_string()
        } else {
            let index = self.quote_index;
            // 顯示順序永遠跟著槽位順序，與抓取完成的先後無關
            self.quote_index = (self.quote_index + 1) % store.len();
            self.quotes_since_banner += 1;

            match store.get(index) {
                Some(quote) if quote.is_displayable() => {
                    format!("{} {} {}", quote.symbol, quote.price, quote.change)
                }
                Some(quote) if quote.status == QuoteStatus::InvalidSymbol => {
                    format!("{} {}", quote.symbol, INVALID_SYMBOL_TEXT)
                }
                _ => self.placeholder.clone(),
            }
        };

        self.segment = concat_string!(text, self.separator).chars().collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        store::QuoteRecord,
        util::datetime::testing::{local_time, FixedClock},
    };

    fn display(width: usize, banner_period: usize) -> config::Display {
        config::Display {
            width,
            scroll_interval_millis: 250,
            banner_period,
            placeholder: "updating ...".to_string(),
            separator: "  ".to_string(),
        }
    }

    fn valid(symbol: &str, price: &str, change: &str) -> QuoteRecord {
        QuoteRecord {
            symbol: symbol.to_string(),
            price: price.to_string(),
            change: change.to_string(),
            status: QuoteStatus::Valid,
        }
    }

    fn store_of(records: &[QuoteRecord]) -> QuoteStore {
        let symbols: Vec<String> = records.iter().map(|r| r.symbol.clone()).collect();
        let store = QuoteStore::new(&symbols);
        for (i, record) in records.iter().enumerate() {
            assert!(store.replace(i, record.clone()));
        }
        store
    }

    /// 每個 tick 收集視窗最後一個字元，即可還原送入視窗的字元流
    fn drain(tape: &mut TickerTape, store: &QuoteStore, ticks: usize) -> String {
        let clock = FixedClock(local_time(2024, 6, 3, 9, 31));
        (0..ticks)
            .map(|_| tape.tick(store, &clock).chars().last().unwrap())
            .collect()
    }

    #[test]
    fn test_window_length_is_constant() {
        let store = store_of(&[valid("AAPL", "195.12", "+1.03")]);
        let mut tape = TickerTape::new(&display(16, 100));
        let clock = FixedClock(local_time(2024, 6, 3, 9, 31));

        for _ in 0..200 {
            let line = tape.tick(&store, &clock);
            assert_eq!(line.chars().count(), 16);
        }
    }

    #[test]
    fn test_stream_follows_store_order() {
        let store = store_of(&[valid("AA", "1", "+1"), valid("BB", "2", "-2")]);
        let mut tape = TickerTape::new(&display(4, 100));

        // 一檔報價段落 = "AA 1 +1" + 分隔字串
        let expected = "AA 1 +1  BB 2 -2  AA 1 +1  ";
        let stream = drain(&mut tape, &store, expected.chars().count());

        assert_eq!(stream, expected);
    }

    #[test]
    fn test_rotates_after_segment_length_ticks() {
        let store = store_of(&[valid("AA", "1", "+1"), valid("BB", "2", "-2")]);
        let mut tape = TickerTape::new(&display(4, 100));
        let clock = FixedClock(local_time(2024, 6, 3, 9, 31));

        let segment_len = "AA 1 +1  ".chars().count();
        for _ in 0..segment_len {
            tape.tick(&store, &clock);
        }
        // 段落播完後，下一個 tick 送入的是第二檔的第一個字元
        let line = tape.tick(&store, &clock);
        assert_eq!(line.chars().last().unwrap(), 'B');
    }

    #[test]
    fn test_pending_quote_shows_placeholder() {
        let symbols = vec!["AAPL".to_string()];
        let store = QuoteStore::new(&symbols);
        let mut tape = TickerTape::new(&display(4, 100));

        let stream = drain(&mut tape, &store, "updating ...".chars().count());
        assert_eq!(stream, "updating ...");
    }

    #[test]
    fn test_invalid_symbol_is_spelled_out() {
        let mut record = QuoteRecord::pending("XXXX");
        record.status = QuoteStatus::InvalidSymbol;
        let store = store_of(&[record]);
        let mut tape = TickerTape::new(&display(4, 100));

        let expected = "XXXX Invalid Symbol  ";
        let stream = drain(&mut tape, &store, expected.chars().count());
        assert_eq!(stream, expected);
    }

    #[test]
    fn test_banner_every_period_quotes() {
        let store = store_of(&[valid("AA", "1", "+1")]);
        let mut tape = TickerTape::new(&display(4, 1));

        // banner_period = 1：報價與看板交錯出現
        let expected = "AA 1 +1  06/03 09:31  AA 1 +1  ";
        let stream = drain(&mut tape, &store, expected.chars().count());
        assert_eq!(stream, expected);
    }

    #[test]
    fn test_banner_does_not_skip_quotes() {
        let store = store_of(&[valid("AA", "1", "+1"), valid("BB", "2", "-2")]);
        let mut tape = TickerTape::new(&display(4, 2));

        // 每兩檔插一次看板，看板之後接著的仍是下一個槽位
        let expected = "AA 1 +1  BB 2 -2  06/03 09:31  AA 1 +1  ";
        let stream = drain(&mut tape, &store, expected.chars().count());
        assert_eq!(stream, expected);
    }

    #[test]
    fn test_empty_store_keeps_scrolling_placeholder() {
        let store = QuoteStore::new(&[]);
        let mut tape = TickerTape::new(&display(4, 3));

        let stream = drain(&mut tape, &store, "updating ...".chars().count());
        assert_eq!(stream, "updating ...");
    }
}
