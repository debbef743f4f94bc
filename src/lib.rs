//! AuthBridge - identity claims bridge
//!
//! Fetches the authenticated client principal from an App Service style
//! `/.auth/me` endpoint when the host framework signals it is connected,
//! extracts a small set of named claims, and republishes them as a reactive
//! input update under a fixed key. Any failure, transport, status, or body
//! shape, falls open to an all-`"unknown"` identity so the host always
//! receives a fully-populated value.
//!
//! The host framework itself is external: the bridge only subscribes to its
//! lifecycle signals (`HostEvent`) and pushes into its input registry
//! through the `InputSink` seam.

// Core modules
pub mod claims;
pub mod constants;
pub mod types;

// Identity endpoint client
pub mod client;

// Host-facing publish seam
pub mod sink;

// Fetch-extract-publish core
pub mod bridge;

// Host lifecycle loop and readiness watchdog
pub mod lifecycle;

// Runner configuration
pub mod config;

// Re-export commonly used types
pub use bridge::AuthBridge;
pub use client::{HttpIdentityClient, IdentityClient};
pub use sink::{ChannelSink, InputSink};
pub use types::{Claim, ClientPrincipal, HostEvent, InputPriority, InputUpdate, UserData};
