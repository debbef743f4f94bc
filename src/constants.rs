//! Application constants
//!
//! Centralized constants for the identity endpoint, claim type names, the
//! host input key, and timing defaults used throughout the bridge.

/// Identity endpoint constants
pub mod endpoint {
    /// Default "who am I" endpoint exposed by the App Service auth layer
    pub const DEFAULT_AUTH_ME_URL: &str =
        "https://az-auth-test-stage.azurewebsites.net/.auth/me";

    /// Default per-request timeout in milliseconds
    pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 8000;
}

/// Claim type names as they appear in `user_claims` entries
pub mod claims {
    /// Display name claim
    pub const NAME: &str = "name";

    /// Preferred username claim
    pub const PREFERRED_USERNAME: &str = "preferred_username";

    /// Short-form role claim emitted by newer token configurations
    pub const ROLES: &str = "roles";

    /// Long-form role claim URI emitted by legacy token configurations
    ///
    /// Tenants that have not opted into short claim names send roles under
    /// this URI instead of `roles`; both spellings must be collected.
    pub const ROLES_URI: &str =
        "http://schemas.microsoft.com/ws/2008/06/identity/claims/role";
}

/// Host input channel constants
pub mod input {
    /// Reactive input key the bridge publishes under
    pub const KEY: &str = "AzureAuth";
}

/// Lifecycle timing constants
pub mod lifecycle {
    /// How long to wait for the host ready signal before warning (ms)
    pub const DEFAULT_READY_TIMEOUT_MS: u64 = 10_000;
}
