//! Fetch-extract-publish core.

use crate::claims;
use crate::client::IdentityClient;
use crate::constants::input;
use crate::sink::InputSink;
use crate::types::{InputPriority, InputUpdate, UserData};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Bridges the identity endpoint into the host's reactive input registry.
///
/// Each triggering event fetches the principal once and publishes exactly
/// one fully-populated `UserData` under the fixed key, real values on
/// success, `UserData::unknown()` on any failure. Overlapping fetches from
/// rapid re-triggers are resolved by start order: once a fetch has
/// published, results from earlier-started fetches are dropped.
pub struct AuthBridge {
    client: Arc<dyn IdentityClient>,
    sink: Arc<dyn InputSink>,
    next_seq: AtomicU64,
    published_seq: Mutex<u64>,
}

impl AuthBridge {
    pub fn new(client: Arc<dyn IdentityClient>, sink: Arc<dyn InputSink>) -> Self {
        Self {
            client,
            sink,
            next_seq: AtomicU64::new(0),
            published_seq: Mutex::new(0),
        }
    }

    /// Fetch the current principal and publish the resulting identity value.
    pub async fn fetch_and_publish(&self) {
        // Sequence is taken at start so a slow fetch cannot clobber the
        // result of one triggered after it.
        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed) + 1;

        let data = match self.client.fetch_principal().await {
            Ok(body) => claims::user_data_from_body(&body),
            Err(e) => {
                log::error!("[bridge] could not retrieve user data: {e:?}");
                UserData::unknown()
            }
        };

        // Seq check and publish happen under one lock so a stale result can
        // neither pass the check nor land after a newer publish.
        if let Ok(mut published) = self.published_seq.lock() {
            if seq <= *published {
                log::debug!("[bridge] dropping stale result (seq {seq})");
                return;
            }
            *published = seq;

            log::info!(
                "[bridge] publishing {} (user_id: {}, roles: {})",
                input::KEY,
                data.user_id,
                data.roles.len()
            );
            self.sink.set_input(InputUpdate {
                key: input::KEY.to_string(),
                value: serde_json::json!(data),
                priority: InputPriority::Event,
            });
        }
    }
}
