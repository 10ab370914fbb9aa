use std::{env, sync::Arc};

use anyhow::Result;

pub mod config;
pub mod crawler;
pub mod declare;
pub mod display;
pub mod event;
pub mod logging;
pub mod scheduler;
pub mod store;
pub mod ticker;
pub mod util;

use crate::{
    config::SETTINGS,
    crawler::WebQuoteFetcher,
    declare::TapeUnit,
    display::{ConsolePanel, Panel},
    event::{
        active_window::ActiveWindowController, quote_fetch::QuoteFetchLoop,
        ticker_tape::TickerTapeLoop, PauseGate,
    },
    store::QuoteStore,
    util::datetime::SystemClock,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    logging::info_file_async(format!(
        "StockTicker 已啟動\r\nRust OS/Arch: {}/{}",
        env::consts::OS,
        env::consts::ARCH
    ));

    if SETTINGS.ticker.symbols.is_empty() {
        logging::error_console("No ticker symbols configured, nothing to display".to_string());
        return Ok(());
    }

    let store = Arc::new(QuoteStore::new(&SETTINGS.ticker.symbols));
    let panel: Arc<dyn Panel> = Arc::new(ConsolePanel::new(SETTINGS.display.width));
    let fetch_gate = Arc::new(PauseGate::new(TapeUnit::QuoteFetch));
    let render_gate = Arc::new(PauseGate::new(TapeUnit::TickerTape));

    tokio::spawn(
        QuoteFetchLoop::new(
            store.clone(),
            WebQuoteFetcher::new(SETTINGS.ticker.quote_url.clone()),
            SystemClock,
            fetch_gate.clone(),
            SETTINGS.schedule.clone(),
        )
        .run(),
    );

    tokio::spawn(
        TickerTapeLoop::new(
            store,
            SystemClock,
            panel.clone(),
            render_gate.clone(),
            &SETTINGS.display,
        )
        .run(),
    );

    tokio::spawn(
        ActiveWindowController::new(
            SystemClock,
            SETTINGS.schedule.clone(),
            fetch_gate,
            render_gate.clone(),
            panel.clone(),
        )
        .run(),
    );

    tokio::signal::ctrl_c().await?;

    // 作息時段外畫面已經是空的，不用再清一次
    if !render_gate.is_paused() {
        panel.clear();
    }
    logging::info_file_async("StockTicker 已停止".to_string());

    Ok(())
}
