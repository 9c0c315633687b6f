//! HTTP client wrapper - the three backend calls

use std::time::Instant;

use reqwest::StatusCode;

use crate::messages::NetworkResponse;
use crate::models::{PushToken, SleepStatus, StatusPayload, StatusSnapshot};

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    use std::time::Duration;

    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}

fn transport_error_message(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "Request timed out (30s)".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        format!("Request failed: {}", e)
    }
}

/// `GET {base}/sleepstatus` - fetch the current snapshot
pub async fn fetch_status(
    client: &reqwest::Client,
    url: String,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = client.get(&url).send().await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(resp) if resp.status().is_success() => match resp.json::<StatusPayload>().await {
            Ok(payload) => match StatusSnapshot::try_from(payload) {
                Ok(snapshot) => NetworkResponse::Status {
                    id: request_id,
                    snapshot,
                    time_ms: elapsed,
                },
                Err(e) => NetworkResponse::StatusError {
                    id: request_id,
                    message: format!("Malformed status payload: {}", e),
                    time_ms: elapsed,
                },
            },
            Err(e) => NetworkResponse::StatusError {
                id: request_id,
                message: format!("Error reading body: {}", e),
                time_ms: elapsed,
            },
        },
        Ok(resp) => NetworkResponse::StatusError {
            id: request_id,
            message: format!("Failed to fetch sleep status (HTTP {})", resp.status().as_u16()),
            time_ms: elapsed,
        },
        Err(e) => NetworkResponse::StatusError {
            id: request_id,
            message: transport_error_message(&e),
            time_ms: elapsed,
        },
    }
}

/// `POST {base}/updatesleep` - ask the backend to flip the flag
pub async fn toggle_sleep(
    client: &reqwest::Client,
    url: String,
    target: SleepStatus,
    request_id: u64,
) -> NetworkResponse {
    let start = Instant::now();
    let result = client
        .post(&url)
        .header("Content-Type", "text/plain")
        .body(target.as_wire())
        .send()
        .await;
    let elapsed = start.elapsed().as_millis() as u64;

    match result {
        Ok(resp) if resp.status().is_success() => NetworkResponse::ToggleAccepted {
            id: request_id,
            time_ms: elapsed,
        },
        Ok(resp) if resp.status() == StatusCode::NOT_MODIFIED => {
            NetworkResponse::ToggleUnchanged { id: request_id }
        }
        Ok(resp) => NetworkResponse::ToggleError {
            id: request_id,
            message: format!("Failed to toggle sleep status (HTTP {})", resp.status().as_u16()),
        },
        Err(e) => NetworkResponse::ToggleError {
            id: request_id,
            message: transport_error_message(&e),
        },
    }
}

/// `POST {base}/join` - register the push token (best-effort)
pub async fn subscribe(
    client: &reqwest::Client,
    url: String,
    token: PushToken,
    request_id: u64,
) -> NetworkResponse {
    let result = client
        .post(&url)
        .header("Content-Type", "text/plain")
        .body(token.0)
        .send()
        .await;

    match result {
        Ok(resp) if resp.status().is_success() => NetworkResponse::Subscribed { id: request_id },
        Ok(resp) => NetworkResponse::SubscribeError {
            id: request_id,
            message: format!("Server responded with status {}", resp.status().as_u16()),
        },
        Err(e) => NetworkResponse::SubscribeError {
            id: request_id,
            message: transport_error_message(&e),
        },
    }
}
