//! Host lifecycle wiring: the connected-event loop and the readiness
//! watchdog.

use crate::bridge::AuthBridge;
use crate::types::HostEvent;
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::sync::oneshot;
use tokio::time::{sleep, Duration};

/// Drive the bridge from host lifecycle events.
///
/// Every `Connected` signal starts an independent fetch; rapid re-triggers
/// overlap and are ordered by the bridge's sequence guard. The watchdog, if
/// armed, is disarmed on the first `Connected`. Returns when the host sends
/// `Shutdown` or closes the channel.
pub async fn run(
    bridge: Arc<AuthBridge>,
    mut events: UnboundedReceiver<HostEvent>,
    mut watchdog: Option<ReadyWatchdog>,
) -> Result<()> {
    log::info!("[lifecycle] waiting for host connected signal");
    while let Some(event) = events.recv().await {
        match event {
            HostEvent::Connected => {
                if let Some(w) = watchdog.take() {
                    w.disarm();
                }
                log::info!("[lifecycle] host connected, fetching identity");
                let bridge = bridge.clone();
                tokio::spawn(async move {
                    bridge.fetch_and_publish().await;
                });
            }
            HostEvent::Shutdown => {
                log::info!("[lifecycle] host shutdown, stopping");
                break;
            }
        }
    }
    Ok(())
}

/// One-shot warning if the host never becomes ready to accept input.
///
/// Dropping an armed watchdog cancels it, so it dies with the event loop
/// that holds it.
pub struct ReadyWatchdog {
    cancel: Option<oneshot::Sender<()>>,
}

impl ReadyWatchdog {
    /// Arm the watchdog; it logs a single warning after `timeout_ms` unless
    /// disarmed first.
    pub fn arm(timeout_ms: u64) -> Self {
        let (cancel, cancelled) = oneshot::channel::<()>();
        tokio::spawn(async move {
            tokio::select! {
                _ = sleep(Duration::from_millis(timeout_ms)) => {
                    log::warn!(
                        "[lifecycle] host input channel not available after {timeout_ms}ms"
                    );
                }
                _ = cancelled => {}
            }
        });
        Self {
            cancel: Some(cancel),
        }
    }

    /// Cancel the pending warning.
    pub fn disarm(mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }
}
