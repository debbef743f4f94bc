// Standalone runner. Stands in for the host framework: arms the readiness
// watchdog, emits a single connected signal, and prints the one resulting
// input update as JSON.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;

use authbridge::{
    config::load,
    lifecycle::{self, ReadyWatchdog},
    types::{HostEvent, InputUpdate},
    AuthBridge, ChannelSink, HttpIdentityClient,
};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cfg = load().context("Failed to load configuration")?;
    log::info!("[main] identity endpoint: {}", cfg.auth_me_url);

    // bridge + channels
    let (input_tx, mut input_rx) = unbounded_channel::<InputUpdate>();
    let (host_tx, host_rx) = unbounded_channel::<HostEvent>();

    let client = HttpIdentityClient::new(cfg.auth_me_url.clone(), cfg.fetch_timeout_ms);
    let bridge = Arc::new(AuthBridge::new(
        Arc::new(client),
        Arc::new(ChannelSink::new(input_tx)),
    ));

    let watchdog = ReadyWatchdog::arm(cfg.ready_timeout_ms);
    let loop_task = tokio::spawn(lifecycle::run(bridge, host_rx, Some(watchdog)));

    let _ = host_tx.send(HostEvent::Connected);

    // Exactly one publish follows the connected signal, real or defaulted.
    if let Some(update) = input_rx.recv().await {
        println!("{}", serde_json::json!(update));
    }

    let _ = host_tx.send(HostEvent::Shutdown);
    loop_task.await??;
    Ok(())
}
