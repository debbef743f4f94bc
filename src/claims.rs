//! Defensive decoding of the identity endpoint's client principal.
//!
//! The body shape is externally controlled and may be absent, empty, or
//! malformed in any field. Shape problems never propagate as errors: they
//! decode to "no principal" and the caller falls back to defaults.

use crate::constants::claims as claim_types;
use crate::types::{Claim, ClientPrincipal, UserData, UNKNOWN};
use serde_json::Value;

/// Decode the first element of the endpoint's array response.
///
/// Returns `None` when the body is not a non-empty array of objects, or the
/// first element carries no `user_claims` array. Individual claim entries
/// that are not `{typ, val}` string pairs are skipped.
pub fn decode_principal(body: &Value) -> Option<ClientPrincipal> {
    let first = match body.as_array().and_then(|a| a.first()) {
        Some(v) if v.is_object() => v,
        _ => {
            log::warn!("[claims] response body is not a non-empty array of objects");
            return None;
        }
    };

    let raw_claims = match first.get("user_claims").and_then(|v| v.as_array()) {
        Some(arr) => arr,
        None => {
            log::warn!("[claims] first principal entry has no user_claims array");
            return None;
        }
    };

    let user_id = first
        .get("user_id")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let user_claims: Vec<Claim> = raw_claims
        .iter()
        .filter_map(|c| serde_json::from_value(c.clone()).ok())
        .collect();
    if user_claims.len() < raw_claims.len() {
        log::debug!(
            "[claims] skipped {} malformed claim entries",
            raw_claims.len() - user_claims.len()
        );
    }

    Some(ClientPrincipal {
        user_id,
        user_claims,
    })
}

/// Scan the principal's claims into the published identity fields.
///
/// First match wins for `name` and `preferred_username`. Every role claim,
/// short form or legacy URI, contributes its value to `roles` in order.
pub fn extract_user_data(principal: &ClientPrincipal) -> UserData {
    let find = |typ: &str| {
        principal
            .user_claims
            .iter()
            .find(|c| c.typ == typ)
            .map(|c| c.val.clone())
    };

    let roles: Vec<String> = principal
        .user_claims
        .iter()
        .filter(|c| c.typ == claim_types::ROLES || c.typ == claim_types::ROLES_URI)
        .map(|c| c.val.clone())
        .collect();

    UserData {
        name: find(claim_types::NAME).unwrap_or_else(|| UNKNOWN.to_string()),
        preferred_username: find(claim_types::PREFERRED_USERNAME)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        user_id: principal
            .user_id
            .clone()
            .unwrap_or_else(|| UNKNOWN.to_string()),
        roles,
    }
}

/// Full body to published identity value, defaulting on any shape problem.
pub fn user_data_from_body(body: &Value) -> UserData {
    match decode_principal(body) {
        Some(principal) => extract_user_data(&principal),
        None => {
            log::info!("[claims] principal not in the expected format, defaulting to unknown");
            UserData::unknown()
        }
    }
}
