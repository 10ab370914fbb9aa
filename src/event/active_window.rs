//! 裝置作息控制器。
//!
//! 以抓取間隔的節拍檢查作息時段，只在狀態翻轉時動作：
//! 進入時段恢復抓取與跑馬燈，離開時段暫停兩者並清空畫面。
//! 同一狀態內的重複 tick 不會重複發出暫停/恢復。

use std::{sync::Arc, time::Duration};

use tokio::time::{self, Instant};

use crate::{
    config, display::Panel, event::PauseGate, logging, scheduler, util::datetime::Clock,
};

pub struct ActiveWindowController<C> {
    clock: C,
    schedule: config::Schedule,
    fetch_gate: Arc<PauseGate>,
    render_gate: Arc<PauseGate>,
    panel: Arc<dyn Panel>,
    /// 上一次觀察到的作息狀態，None 代表開機後尚未觀察
    was_active: Option<bool>,
}

impl<C: Clock> ActiveWindowController<C> {
    pub fn new(
        clock: C,
        schedule: config::Schedule,
        fetch_gate: Arc<PauseGate>,
        render_gate: Arc<PauseGate>,
        panel: Arc<dyn Panel>,
    ) -> Self {
        ActiveWindowController {
            clock,
            schedule,
            fetch_gate,
            render_gate,
            panel,
            was_active: None,
        }
    }

    pub async fn run(mut self) {
        let mut task_interval = time::interval_at(
            Instant::now(),
            Duration::from_millis(self.schedule.fetch_interval_millis),
        );

        loop {
            task_interval.tick().await;
            self.tick_once();
        }
    }

    pub(crate) fn tick_once(&mut self) {
        let active = scheduler::is_display_active(&self.clock.now(), &self.schedule);

        match self.transition(active) {
            Some(true) => {
                logging::info_file_async(
                    "Active window opened, resuming quote fetch and ticker".to_string(),
                );
                self.fetch_gate.resume();
                self.render_gate.resume();
            }
            Some(false) => {
                logging::info_file_async(
                    "Active window closed, suspending quote fetch and ticker".to_string(),
                );
                self.fetch_gate.pause();
                self.render_gate.pause();
                self.panel.clear();
            }
            None => {}
        }
    }

    /// 回傳 Some(新狀態) 代表狀態翻轉，None 代表維持原狀。
    ///
    /// 開機後的第一次觀察一律視為翻轉，讓閘門與目前時段對齊。
    fn transition(&mut self, active: bool) -> Option<bool> {
        if self.was_active == Some(active) {
            return None;
        }

        self.was_active = Some(active);
        Some(active)
    }
}
