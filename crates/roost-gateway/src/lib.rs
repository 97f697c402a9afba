//! Roost Gateway — rate-limit-aware wrapper over the X API v2.
//!
//! Every write/read path goes through [`Gateway`], which performs the
//! provider call, extracts the quota window the provider reported on the
//! response, and writes it through to the store for dashboard display.
//! Tier-restricted feeds can be gated at composition time via
//! [`UpgradeGate`], in which case the provider is never called.
//!
//! ```text
//! route ──► Gateway ──► XApi (reqwest / mock)
//!              │
//!              └──► Store.upsert_quota (write-through)
//! ```
//!
//! Local quota rows are informational only: the gateway never pre-checks
//! them before a call, so exhaustion surfaces as a normal provider error.

#![forbid(unsafe_code)]

pub mod client;
pub mod config;
pub mod error;
pub mod gate;
pub mod gateway;
pub mod types;

pub use client::{XApi, XClient};
pub use config::XConfig;
pub use error::{Error, Result};
pub use gate::UpgradeGate;
pub use gateway::Gateway;
pub use types::{
    CreateTweetResponse, Feed, PostedTweet, Profile, RateLimitInfo, RateLimitStatus, Tweet,
    TweetMetrics, TweetPage, UpgradeNotice,
};
