use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use concat_string::concat_string;
use once_cell::sync::{Lazy, OnceCell};
use reqwest::{Client, Method, Response};

use crate::{config::SETTINGS, logging::Logger, util};

pub mod user_agent;

/// A singleton instance of the reqwest client.
static CLIENT: OnceCell<Client> = OnceCell::new();

static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new("http"));

/// Returns the reqwest client singleton instance or creates one if it doesn't exist.
///
/// The read timeout comes from the configuration so a hung provider bounds
/// quote staleness instead of blocking the fetch loop forever.
fn get_client() -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        util::ensure_rustls_crypto_provider();

        Client::builder()
            .brotli(true)
            .gzip(true)
            .connect_timeout(Duration::from_secs(8))
            .timeout(Duration::from_secs(SETTINGS.schedule.fetch_timeout_seconds))
            .tcp_nodelay(true)
            .tcp_keepalive(Duration::from_secs(60))
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(90))
            .user_agent(user_agent::gen_random_ua())
            .build()
            .map_err(|e| anyhow!("Failed to create reqwest client: {:?}", e))
    })
}

/// Performs an HTTP GET request and returns the response re-framed the way
/// the display device reads it off the wire: status line, blank line, body.
///
/// Non-success statuses are NOT an error here. The status line is part of
/// the returned text and it is the extractor's job to judge it; only
/// transport failures (connect error, timeout) surface as `Err`.
///
/// # Arguments
///
/// * `url`: The URL to send the GET request to.
///
/// # Returns
///
/// * `Result<String>`: The raw response text, or an error if the request
///   cannot be sent at all.
pub async fn get_raw(url: &str) -> Result<String> {
    let response = send(Method::GET, url).await?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| anyhow!("Error parsing response text: {:?}", e))?;

    Ok(concat_string!("HTTP/1.1 ", status.to_string(), "\r\n\r\n", body))
}

/// HTTP 請求失敗時的最大重試次數。
const MAX_RETRIES: usize = 2;

/// Sends an HTTP request with retries on failure.
///
/// This function will attempt to send the request up to MAX_RETRIES times.
/// If a request attempt fails, it logs the error and retries after a delay
/// that grows with each attempt.
async fn send(method: Method, url: &str) -> Result<Response> {
    let visit_log = format!("{method}:{url}");
    let client = get_client()?;
    let mut last_error = String::new();

    for attempt in 1..=MAX_RETRIES {
        let msg = format!("Attempt {} to send {}", attempt, visit_log);
        let start = Instant::now();
        let res = client.request(method.clone(), url).send().await;
        let elapsed = start.elapsed().as_millis();

        match res {
            Ok(response) => {
                LOGGER.info(format!("{} {} ms", msg, elapsed));
                return Ok(response);
            }
            Err(why) => {
                last_error = format!("{:?}", why);
                LOGGER.error(format!("{} failed because {:?}. {} ms", msg, why, elapsed));
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(Duration::from_secs(2u64.pow(attempt as u32))).await;

                    continue;
                }
            }
        }
    }

    Err(anyhow!(
        "Failed to send request to {} after {} attempts; last error: {}",
        url,
        MAX_RETRIES,
        last_error
    ))
}
