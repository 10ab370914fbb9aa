use std::io::{self, Write};

/// 畫面能力的介面。
///
/// 實際的裝置由面板驅動程式負責畫點陣字型，這裡只要求
/// 「在固定位置畫出一行文字」與「清空畫面」兩件事；
/// 桌面環境以主控台單行覆寫的方式模擬。
pub trait Panel: Send + Sync {
    /// 畫出文字的前 `width` 個字元（由呼叫端保證長度）
    fn draw(&self, text: &str);
    /// 清空畫面
    fn clear(&self);
}

/// 以主控台單行覆寫模擬的面板
pub struct ConsolePanel {
    width: usize,
}

impl ConsolePanel {
    pub fn new(width: usize) -> Self {
        ConsolePanel { width }
    }
}

impl Panel for ConsolePanel {
    fn draw(&self, text: &str) {
        let line: String = text.chars().take(self.width).collect();
        print!("\r{}", line);
        let _ = io::stdout().flush();
    }

    fn clear(&self) {
        let blank: String = std::iter::repeat(' ').take(self.width).collect();
        print!("\r{}\r", blank);
        let _ = io::stdout().flush();
    }
}
