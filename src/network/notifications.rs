//! Notification stream - receives the push token and incoming notifications
//!
//! The stream speaks a minimal protocol: the first text frame after connect
//! is the opaque device token, every later text frame is a JSON notification
//! `{ "title": ..., "body": ... }`.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, oneshot};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use crate::messages::NetworkResponse;
use crate::models::{Notification, NotificationPayload, PushToken};

/// Connect to the notification stream and forward incoming frames
pub async fn run_notification_stream(
    id: u64,
    url: &str,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    mut cancel_rx: oneshot::Receiver<()>,
) {
    let ws_stream = match connect_async(url).await {
        Ok((stream, _response)) => stream,
        Err(e) => {
            let _ = response_tx.send(NetworkResponse::StreamError {
                id,
                error: format!("Connection failed: {}", e),
            });
            return;
        }
    };

    let (mut write, mut read) = ws_stream.split();
    let mut token_issued = false;

    loop {
        tokio::select! {
            biased;

            // Shutdown / close request
            _ = &mut cancel_rx => {
                let _ = write.close().await;
                let _ = response_tx.send(NetworkResponse::StreamClosed { id });
                return;
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(text))) => {
                        if !token_issued {
                            // First frame is the device token
                            token_issued = true;
                            let _ = response_tx.send(NetworkResponse::TokenIssued {
                                id,
                                token: PushToken(text),
                            });
                        } else {
                            match serde_json::from_str::<NotificationPayload>(&text) {
                                Ok(payload) => {
                                    let _ = response_tx.send(NetworkResponse::Notification {
                                        id,
                                        notification: Notification::from(payload),
                                    });
                                }
                                Err(e) => {
                                    tracing::warn!(id, %e, "Dropping malformed notification frame");
                                }
                            }
                        }
                    }
                    Some(Ok(Message::Ping(data))) => {
                        let _ = write.send(Message::Pong(data)).await;
                    }
                    Some(Ok(Message::Pong(_))) => {}
                    Some(Ok(Message::Close(_))) => {
                        let _ = response_tx.send(NetworkResponse::StreamClosed { id });
                        return;
                    }
                    Some(Ok(_)) => {
                        // Binary and raw frames are not part of the protocol
                    }
                    Some(Err(e)) => {
                        let _ = response_tx.send(NetworkResponse::StreamError {
                            id,
                            error: format!("Receive error: {}", e),
                        });
                        return;
                    }
                    None => {
                        let _ = response_tx.send(NetworkResponse::StreamClosed { id });
                        return;
                    }
                }
            }
        }
    }
}
