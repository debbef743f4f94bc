//! Host-facing publish seam.

use crate::types::InputUpdate;
use tokio::sync::mpsc::UnboundedSender;

/// Push-only handle to the host framework's reactive input registry.
///
/// The registry is treated as overwrite-only; nothing is ever read back.
pub trait InputSink: Send + Sync {
    fn set_input(&self, update: InputUpdate);
}

/// Forwards updates to the host over an unbounded channel.
pub struct ChannelSink {
    tx: UnboundedSender<InputUpdate>,
}

impl ChannelSink {
    pub fn new(tx: UnboundedSender<InputUpdate>) -> Self {
        Self { tx }
    }
}

impl InputSink for ChannelSink {
    fn set_input(&self, update: InputUpdate) {
        if self.tx.send(update).is_err() {
            log::warn!("[sink] host input channel closed, dropping update");
        }
    }
}
