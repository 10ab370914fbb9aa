use tokio::sync::watch;

use crate::{declare::TapeUnit, logging};

pub mod active_window;
pub mod quote_fetch;
pub mod ticker_tape;

/// 工作單元的暫停開關。
///
/// 作息控制器是唯一的寫入端；各迴圈在每輪開始時呼叫
/// [`PauseGate::wait_if_paused`]，暫停只發生在迴圈邊界，
/// 不會取消進行中的網路請求。
pub struct PauseGate {
    unit: TapeUnit,
    paused: watch::Sender<bool>,
}

impl PauseGate {
    /// 建立一個未暫停的開關
    pub fn new(unit: TapeUnit) -> Self {
        let (paused, _) = watch::channel(false);
        PauseGate { unit, paused }
    }

    pub fn pause(&self) {
        if !self.paused.send_replace(true) {
            logging::info_file_async(format!("{} suspended", self.unit.name()));
        }
    }

    pub fn resume(&self) {
        if self.paused.send_replace(false) {
            logging::info_file_async(format!("{} resumed", self.unit.name()));
        }
    }

    pub fn is_paused(&self) -> bool {
        *self.paused.borrow()
    }

    /// 暫停中就停在這裡直到被恢復
    pub async fn wait_if_paused(&self) {
        let mut rx = self.paused.subscribe();
        while *rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_pause_and_resume() {
        let gate = PauseGate::new(TapeUnit::QuoteFetch);
        assert!(!gate.is_paused());

        gate.pause();
        assert!(gate.is_paused());

        gate.resume();
        assert!(!gate.is_paused());
    }

    #[tokio::test]
    async fn test_wait_if_paused_passes_through_when_running() {
        let gate = PauseGate::new(TapeUnit::TickerTape);

        tokio::time::timeout(Duration::from_millis(100), gate.wait_if_paused())
            .await
            .expect("should not block while running");
    }

    #[tokio::test]
    async fn test_wait_if_paused_blocks_until_resumed() {
        let gate = std::sync::Arc::new(PauseGate::new(TapeUnit::TickerTape));
        gate.pause();

        let blocked = tokio::time::timeout(Duration::from_millis(50), gate.wait_if_paused()).await;
        assert!(blocked.is_err(), "should block while paused");

        let waiter = {
            let gate = gate.clone();
            tokio::spawn(async move { gate.wait_if_paused().await })
        };
        gate.resume();

        tokio::time::timeout(Duration::from_millis(200), waiter)
            .await
            .expect("resume should release the waiter")
            .expect("waiter should not panic");
    }
}
