/// 報價槽的狀態
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum QuoteStatus {
    /// 開機後尚未取得任何數據
    Pending,
    /// 價格與漲跌皆已解析成功
    Valid,
    /// 供應端以非 200 回應，代號無效
    InvalidSymbol,
    /// 回應內容缺少預期的標記或內文
    FetchError,
}

impl QuoteStatus {
    pub fn name(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pending",
            QuoteStatus::Valid => "Valid",
            QuoteStatus::InvalidSymbol => "InvalidSymbol",
            QuoteStatus::FetchError => "FetchError",
        }
    }

    /// 報價是否能以「代號 價格 漲跌」的形式上跑馬燈
    pub fn is_displayable(&self) -> bool {
        matches!(self, QuoteStatus::Valid)
    }
}

/// 可被作息控制器暫停/恢復的工作單元
#[derive(PartialEq, Eq, Debug, Copy, Clone)]
pub enum TapeUnit {
    /// 報價抓取迴圈
    QuoteFetch,
    /// 跑馬燈繪製迴圈
    TickerTape,
}

impl TapeUnit {
    pub fn name(&self) -> &'static str {
        match self {
            TapeUnit::QuoteFetch => "quote_fetch",
            TapeUnit::TickerTape => "ticker_tape",
        }
    }
}
