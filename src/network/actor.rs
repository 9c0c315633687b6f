//! Network actor - runs HTTP calls and the notification stream in Tokio

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;

use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::network::client::{create_client, fetch_status, subscribe, toggle_sleep};
use crate::network::notifications::run_notification_stream;

/// Handle to the active notification stream
struct ActiveStream {
    cancel_tx: oneshot::Sender<()>,
}

/// Network actor that processes backend commands
pub struct NetworkActor {
    client: reqwest::Client,
    config: Config,
    response_tx: mpsc::UnboundedSender<NetworkResponse>,
    tasks: JoinSet<()>,
    stream: Option<ActiveStream>,
}

impl NetworkActor {
    pub fn new(config: Config, response_tx: mpsc::UnboundedSender<NetworkResponse>) -> Self {
        NetworkActor {
            client: create_client(),
            config,
            response_tx,
            tasks: JoinSet::new(),
            stream: None,
        }
    }

    /// Run the network actor message loop
    pub async fn run(mut self, mut cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>) {
        loop {
            tokio::select! {
                biased;

                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(NetworkCommand::FetchStatus { id }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let url = self.config.endpoint("sleepstatus");

                            self.tasks.spawn(async move {
                                tracing::info!(id, %url, "Fetching status");
                                let result = fetch_status(&client, url, id).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::ToggleSleep { id, target }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let url = self.config.endpoint("updatesleep");

                            self.tasks.spawn(async move {
                                tracing::info!(id, target = target.as_str(), "Toggling sleep status");
                                let result = toggle_sleep(&client, url, target, id).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::Subscribe { id, token }) => {
                            let response_tx = self.response_tx.clone();
                            let client = self.client.clone();
                            let url = self.config.endpoint("join");

                            self.tasks.spawn(async move {
                                tracing::info!(id, "Registering push token");
                                let result = subscribe(&client, url, token, id).await;
                                let _ = response_tx.send(result);
                            });
                        }

                        Some(NetworkCommand::OpenNotificationStream { id }) => {
                            let (cancel_tx, cancel_rx) = oneshot::channel();
                            self.stream = Some(ActiveStream { cancel_tx });

                            let response_tx = self.response_tx.clone();
                            let url = self.config.notify_url.clone();

                            self.tasks.spawn(async move {
                                tracing::info!(id, %url, "Opening notification stream");
                                run_notification_stream(id, &url, response_tx, cancel_rx).await;
                            });
                        }

                        Some(NetworkCommand::Shutdown) => {
                            if let Some(stream) = self.stream.take() {
                                let _ = stream.cancel_tx.send(());
                            }
                            break;
                        }

                        None => break,
                    }
                }

                // Clean up completed tasks
                Some(_result) = self.tasks.join_next() => {
                    // Task completed - responses were already sent
                }
            }
        }
    }
}
