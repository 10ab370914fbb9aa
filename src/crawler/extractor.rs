//! 報價頁內文的掃描器。
//!
//! 輸入是裝置從線路上讀到的原始回應文字（狀態列、空行、內文），
//! 文法固定如下，因此用手寫掃描而不是 HTML 解析器或 regex：
//!
//! ```text
//! HTTP/1.1 200 OK            -- 成功標記，缺少時視為無效代號
//! ...
//! <div class="structured-data">   -- 內容標記，內文從下一行開始
//! ... price="45.6789" ...         -- 鍵名不分大小寫，值只含 [0-9.]
//! ... priceChange="-1.234" ...    -- 值允許一個開頭的負號
//! </div>                          -- 以 `</` 開頭的行結束內文
//! ```
//!
//! 鍵名必須落在字詞邊界上（前一個位元組不是英數字），
//! 同名欄位以文件順序第一個為準；掃不到值時欄位留空，
//! 空欄位代表「尚未就緒」而不是 0。

use crate::{declare::QuoteStatus, store::QuoteRecord, util::text};

/// HTTP 狀態列的成功標記
pub const SUCCESS_MARKER: &str = "200 OK";
/// 報價區塊的起始標記
pub const DATA_MARKER: &str = "structured-data";

const PRICE_KEY: &str = "price";
const CHANGE_KEY: &str = "pricechange";

/// 將一份原始回應文字解析成單一股票的報價記錄。
///
/// 純函式，不做任何 I/O；所有失敗模式都以 [`QuoteStatus`] 表達，
/// 呼叫端據此決定槽位要不要覆寫。
pub fn extract(stock_symbol: &str, raw: &str) -> QuoteRecord {
    let mut record = QuoteRecord::pending(stock_symbol);

    if !raw.contains(SUCCESS_MARKER) {
        record.status = QuoteStatus::InvalidSymbol;
        return record;
    }

    let body = collect_structured_data(raw);
    if body.is_empty() {
        record.status = QuoteStatus::FetchError;
        return record;
    }

    record.price = text::truncate_decimal(&scan_field(&body, PRICE_KEY, false));
    record.change =
        text::normalize_change_sign(&text::truncate_decimal(&scan_field(&body, CHANGE_KEY, true)));

    // 兩個欄位都到齊才算有效，缺一個就停留在 Pending 等下一輪補齊
    if !record.price.is_empty() && !record.change.is_empty() {
        record.status = QuoteStatus::Valid;
    }

    record
}

/// 收集內容標記之後、結尾標籤之前的各行，串成一個工作緩衝區
fn collect_structured_data(raw: &str) -> String {
    let mut body = String::with_capacity(256);
    let mut in_data = false;

    for line in raw.lines() {
        if !in_data {
            in_data = line.contains(DATA_MARKER);
            continue;
        }

        let trimmed = line.trim();
        if trimmed.starts_with("</") {
            break;
        }
        if trimmed.is_empty() {
            continue;
        }

        if !body.is_empty() {
            body.push(' ');
        }
        body.push_str(trimmed);
    }

    body
}

/// 在緩衝區內找出 `key="<value>"` 形式的第一個欄位值。
///
/// 回傳空字串代表找不到欄位、欄位值為空、或殘值無法解析成十進位數。
fn scan_field(buf: &str, key: &str, signed: bool) -> String {
    let needle = format!("{}=\"", key);
    let bytes = buf.as_bytes();
    let mut from = 0;

    while let Some(at) = find_ascii_ci(bytes, needle.as_bytes(), from) {
        // price=" 不可命中 priceChange=" 的一部分
        if at > 0 && bytes[at - 1].is_ascii_alphanumeric() {
            from = at + 1;
            continue;
        }

        let value_start = at + needle.len();
        let mut end = value_start;
        while end < bytes.len() {
            let b = bytes[end];
            let in_class =
                b.is_ascii_digit() || b == b'.' || (signed && b == b'-' && end == value_start);
            if !in_class {
                break;
            }
            end += 1;
        }

        let value = &buf[value_start..end];
        if value.is_empty() || text::parse_decimal(value, None).is_err() {
            return String::new();
        }

        return value.to_string();
    }

    String::new()
}

/// 不分 ASCII 大小寫的子字串搜尋
fn find_ascii_ci(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() || from > haystack.len() - needle.len() {
        return None;
    }

    haystack[from..]
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
        .map(|pos| pos + from)
}
