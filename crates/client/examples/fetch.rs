//! Fetches a few URLs over one pooled client.
//!
//! ```text
//! cargo run --example fetch -- https://httpbin.org/ip http://httpbin.org/get
//! ```

use std::time::Duration;

use micro_http_client::protocol::Headers;
use micro_http_client::{Client, ClientConfig};
use serde_json::json;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder().with_max_level(Level::DEBUG).finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let mut urls: Vec<String> = std::env::args().skip(1).collect();
    if urls.is_empty() {
        urls = vec!["https://httpbin.org/ip".to_string(), "https://httpbin.org/get".to_string()];
    }

    let config = ClientConfig::default().with_read_timeout(Duration::from_secs(10));
    let client = Client::with_config(config);

    for url in &urls {
        let response = match client.get(url, Headers::new()).await {
            Ok(response) => response,
            Err(e) => {
                error!(url = %url, cause = %e, "request failed");
                continue;
            }
        };

        info!(url = %url, %response, boundary = ?response.boundary(), "received response");
        match response.json_value() {
            Ok(value) => info!(%value, "json body"),
            Err(e) => match response.text() {
                Ok(text) => info!(body = text, "text body"),
                Err(_) => warn!(cause = %e, size = response.bytes().len(), "body is neither json nor text"),
            },
        }
    }

    if let Some(url) = urls.first() {
        let target = url.replace("/ip", "/post");
        match client.post(&target, &json!({"test": 123}), Headers::new()).await {
            Ok(response) => info!(url = %target, %response, "posted json"),
            Err(e) => error!(url = %target, cause = %e, "post failed"),
        }
    }

    client.close().await;
}
