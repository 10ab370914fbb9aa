//! 報價的共享儲存區。
//!
//! 一個設定檔股票對應一個槽位，槽位順序即顯示順序，程式存活期間不增減。
//! 抓取迴圈是唯一的寫入者，跑馬燈迴圈只讀取；以 `RwLock` 保護，
//! 寫入一律是整筆替換，讀取端不會看到寫到一半的記錄。
//! 若鎖取得失敗，API 回傳 `None` 或 `false` 以避免 panic，
//! 由上層依回傳值決定是否略過本次處理。

use std::sync::RwLock;

use crate::declare::QuoteStatus;

/// 單一股票在某個時點的報價
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Security code
    pub symbol: String,
    /// 價格字串，最多兩位小數；空字串代表尚未取得
    pub price: String,
    /// 漲跌字串，帶正負號；空字串代表尚未取得
    pub change: String,
    pub status: QuoteStatus,
}

impl QuoteRecord {
    /// 開機時的空槽位
    pub fn pending(symbol: &str) -> Self {
        QuoteRecord {
            symbol: symbol.to_string(),
            price: String::new(),
            change: String::new(),
            status: QuoteStatus::Pending,
        }
    }

    /// 是否有一筆可以完整顯示的報價
    pub fn is_displayable(&self) -> bool {
        self.status.is_displayable() && !self.price.is_empty() && !self.change.is_empty()
    }
}

/// 所有槽位的集中儲存區，槽位數等於設定檔內的股票數
pub struct QuoteStore {
    quotes: RwLock<Vec<QuoteRecord>>,
    symbol_count: usize,
}

impl QuoteStore {
    pub fn new(symbols: &[String]) -> Self {
        let quotes = symbols
            .iter()
            .map(|symbol| QuoteRecord::pending(symbol))
            .collect::<Vec<_>>();

        QuoteStore {
            symbol_count: quotes.len(),
            quotes: RwLock::new(quotes),
        }
    }

    /// 槽位數，整個程式存活期間不變
    pub fn len(&self) -> usize {
        self.symbol_count
    }

    pub fn is_empty(&self) -> bool {
        self.symbol_count == 0
    }

    /// 回傳指定槽位的股票代號
    pub fn symbol(&self, index: usize) -> Option<String> {
        let quotes = self.quotes.read().ok()?;
        quotes.get(index).map(|q| q.symbol.clone())
    }

    /// 取出指定槽位目前的報價快照
    pub fn get(&self, index: usize) -> Option<QuoteRecord> {
        let quotes = self.quotes.read().ok()?;
        quotes.get(index).cloned()
    }

    /// 以整筆替換的方式寫入槽位，成功時回傳 true
    pub fn replace(&self, index: usize, record: QuoteRecord) -> bool {
        match self.quotes.write() {
            Ok(mut quotes) => match quotes.get_mut(index) {
                Some(slot) => {
                    *slot = record;
                    true
                }
                None => false,
            },
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> Vec<String> {
        vec!["AAPL".to_string(), "MSFT".to_string()]
    }

    #[test]
    fn test_new_store_is_pending() {
        let store = QuoteStore::new(&symbols());

        assert_eq!(store.len(), 2);
        for i in 0..store.len() {
            let record = store.get(i).unwrap();
            assert_eq!(record.status, QuoteStatus::Pending);
            assert!(record.price.is_empty());
            assert!(!record.is_displayable());
        }
        assert_eq!(store.symbol(0).unwrap(), "AAPL");
        assert_eq!(store.symbol(1).unwrap(), "MSFT");
    }

    #[test]
    fn test_replace_is_whole_record() {
        let store = QuoteStore::new(&symbols());
        let record = QuoteRecord {
            symbol: "AAPL".to_string(),
            price: "195.12".to_string(),
            change: "+1.03".to_string(),
            status: QuoteStatus::Valid,
        };

        assert!(store.replace(0, record.clone()));
        assert_eq!(store.get(0).unwrap(), record);
        // 另一個槽位不受影響
        assert_eq!(store.get(1).unwrap().status, QuoteStatus::Pending);
        // 槽位數不因寫入而改變
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_out_of_range() {
        let store = QuoteStore::new(&symbols());

        assert!(store.get(9).is_none());
        assert!(store.symbol(9).is_none());
        assert!(!store.replace(9, QuoteRecord::pending("X")));
    }

    #[test]
    fn test_is_displayable_requires_both_fields() {
        let mut record = QuoteRecord::pending("KO");
        record.status = QuoteStatus::Valid;
        record.price = "61.05".to_string();
        assert!(!record.is_displayable());

        record.change = "-0.12".to_string();
        assert!(record.is_displayable());
    }
}
