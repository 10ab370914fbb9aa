//! 報價抓取迴圈。
//!
//! 以固定間隔輪巡設定檔內的股票，一次只抓一檔；開盤時間外
//! 只在收盤後補完一輪（拿到收盤價），之後便閒置到下次開盤。

use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Local};
use tokio::time::{self, Instant};

use crate::{
    config,
    crawler::{extractor, QuoteFetcher},
    declare::QuoteStatus,
    event::PauseGate,
    logging, scheduler,
    store::QuoteStore,
    util::datetime::Clock,
};

pub struct QuoteFetchLoop<F, C> {
    store: Arc<QuoteStore>,
    fetcher: F,
    clock: C,
    gate: Arc<PauseGate>,
    schedule: config::Schedule,
    /// 下一個要抓的槽位
    cursor: usize,
    /// 收盤後是否已經補完一輪；開機時為 false，讓第一輪一定會跑
    closed_cycle_done: bool,
    last_cycle_at: Option<DateTime<Local>>,
}

impl<F: QuoteFetcher, C: Clock> QuoteFetchLoop<F, C> {
    pub fn new(
        store: Arc<QuoteStore>,
        fetcher: F,
        clock: C,
        gate: Arc<PauseGate>,
        schedule: config::Schedule,
    ) -> Self {
        QuoteFetchLoop {
            store,
            fetcher,
            clock,
            gate,
            schedule,
            cursor: 0,
            closed_cycle_done: false,
            last_cycle_at: None,
        }
    }

    pub async fn run(mut self) {
        let mut task_interval = time::interval_at(
            Instant::now(),
            Duration::from_millis(self.schedule.fetch_interval_millis),
        );

        loop {
            task_interval.tick().await;
            self.gate.wait_if_paused().await;
            self.tick_once().await;
        }
    }

    /// 處理一個排程 tick
    pub(crate) async fn tick_once(&mut self) {
        let now = self.clock.now();
        let market_open = scheduler::is_market_open(&now, &self.schedule);

        if market_open {
            self.closed_cycle_done = false;
        } else if self.closed_cycle_done {
            // 收盤後已補完一輪，待開盤前不再抓
            return;
        }

        let Some(stock_symbol) = self.store.symbol(self.cursor) else {
            return;
        };

        let raw = match self.fetcher.fetch_raw(&stock_symbol).await {
            Ok(raw) => raw,
            Err(why) => {
                // 連線失敗不前進，下一個 tick 重試同一檔
                logging::error_file_async(format!(
                    "Failed to fetch quote for {} because {:?}",
                    stock_symbol, why
                ));
                return;
            }
        };

        let record = extractor::extract(&stock_symbol, &raw);
        if record.status != QuoteStatus::Valid {
            logging::warn_file_async(format!(
                "Quote for {} came back as {}",
                stock_symbol,
                record.status.name()
            ));
        }

        // 內容缺損時保留上一筆有效報價，寧可顯示舊價也不要顯示空白
        let keep_last_good = record.status == QuoteStatus::FetchError
            && self
                .store
                .get(self.cursor)
                .is_some_and(|current| current.status == QuoteStatus::Valid);
        if !keep_last_good {
            self.store.replace(self.cursor, record);
        }

        self.cursor += 1;
        if self.cursor >= self.store.len() {
            self.cursor = 0;
            if !market_open {
                self.closed_cycle_done = true;
                logging::debug_file_async(
                    "Market closed and the post-close cycle is complete, idling until reopen"
                        .to_string(),
                );
            }

            match self.last_cycle_at {
                Some(prev) => logging::info_file_async(format!(
                    "Completed a full quote cycle, {} seconds since the previous one",
                    now.signed_duration_since(prev).num_seconds()
                )),
                None => {
                    logging::info_file_async("Completed the first full quote cycle".to_string())
                }
            }
            self.last_cycle_at = Some(now);
        }
    }

    #[cfg(test)]
    fn cursor(&self) -> usize {
        self.cursor
    }
}
