use serde::{Deserialize, Serialize};

/// Placeholder for identity fields the endpoint did not supply
pub const UNKNOWN: &str = "unknown";

/// A single typed assertion about the authenticated identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    pub typ: String,
    pub val: String,
}

/// First element of the identity endpoint's array response, decoded
/// defensively (see `claims::decode_principal`)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientPrincipal {
    pub user_id: Option<String>,
    pub user_claims: Vec<Claim>,
}

/// Identity fields published to the host. Always fully populated: anything
/// the endpoint did not supply stays at its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub preferred_username: String,
    pub user_id: String,
    pub roles: Vec<String>,
}

impl UserData {
    /// The fail-open value: every field `"unknown"`, no roles.
    pub fn unknown() -> Self {
        Self {
            name: UNKNOWN.to_string(),
            preferred_username: UNKNOWN.to_string(),
            user_id: UNKNOWN.to_string(),
            roles: Vec::new(),
        }
    }
}

impl Default for UserData {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Delivery hint for a reactive input update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputPriority {
    /// Normal update; the host may skip structurally-equal values
    Value,
    /// Forces host re-evaluation even if the value is unchanged
    Event,
}

/// One named value pushed into the host's reactive input registry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputUpdate {
    pub key: String,
    pub value: serde_json::Value,
    pub priority: InputPriority,
}

/// Lifecycle signals received from the host framework
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// The host is initialized and ready for input publishes
    Connected,
    /// The host is going away; stop the event loop
    Shutdown,
}
