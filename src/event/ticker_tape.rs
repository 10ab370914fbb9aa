//! 跑馬燈繪製迴圈。
//!
//! 以捲動間隔的節拍驅動 [`TickerTape`] 狀態機，
//! 把視窗內容交給面板畫出來。

use std::{sync::Arc, time::Duration};

use tokio::time::{self, Instant};

use crate::{
    config, display::Panel, event::PauseGate, store::QuoteStore, ticker::TickerTape,
    util::datetime::Clock,
};

pub struct TickerTapeLoop<C> {
    tape: TickerTape,
    store: Arc<QuoteStore>,
    clock: C,
    panel: Arc<dyn Panel>,
    gate: Arc<PauseGate>,
    scroll_interval_millis: u64,
}

impl<C: Clock> TickerTapeLoop<C> {
    pub fn new(
        store: Arc<QuoteStore>,
        clock: C,
        panel: Arc<dyn Panel>,
        gate: Arc<PauseGate>,
        display: &config::Display,
    ) -> Self {
        TickerTapeLoop {
            tape: TickerTape::new(display),
            store,
            clock,
            panel,
            gate,
            scroll_interval_millis: display.scroll_interval_millis,
        }
    }

    pub async fn run(mut self) {
        let mut task_interval = time::interval_at(
            Instant::now(),
            Duration::from_millis(self.scroll_interval_millis),
        );

        loop {
            task_interval.tick().await;
            self.gate.wait_if_paused().await;
            self.tick_once();
        }
    }

    pub(crate) fn tick_once(&mut self) {
        let line = self.tape.tick(&self.store, &self.clock);
        self.panel.draw(&line);
    }
}
