pub mod datetime;
pub mod http;
pub mod text;

use std::sync::Once;

static RUSTLS_PROVIDER: Once = Once::new();

/// 確保 rustls 的 CryptoProvider 已安裝，重複呼叫不會出錯
pub fn ensure_rustls_crypto_provider() {
    RUSTLS_PROVIDER.call_once(|| {
        let _ = rustls::crypto::ring::default_provider().install_default();
    });
}
