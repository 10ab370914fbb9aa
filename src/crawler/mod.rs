use anyhow::Result;
use async_trait::async_trait;

use crate::util;

/// 報價頁掃描器
pub mod extractor;

const SYMBOL_PLACEHOLDER: &str = "{symbol}";

/// 取得單一股票原始報價頁的能力。
///
/// 抓取迴圈透過這個介面拿到線路上的原始回應文字；
/// 測試時以假的實作替換，避免碰網路。
#[async_trait]
pub trait QuoteFetcher: Send + Sync {
    async fn fetch_raw(&self, stock_symbol: &str) -> Result<String>;
}

/// 從設定的網址樣板組出報價頁網址並以 HTTPS 抓取
pub struct WebQuoteFetcher {
    quote_url: String,
}

impl WebQuoteFetcher {
    pub fn new(quote_url: String) -> Self {
        WebQuoteFetcher { quote_url }
    }

    /// 將樣板中的 `{symbol}` 換成股票代號
    fn quote_url(&self, stock_symbol: &str) -> String {
        self.quote_url.replace(SYMBOL_PLACEHOLDER, stock_symbol)
    }
}

#[async_trait]
impl QuoteFetcher for WebQuoteFetcher {
    async fn fetch_raw(&self, stock_symbol: &str) -> Result<String> {
        util::http::get_raw(&self.quote_url(stock_symbol)).await
    }
}
