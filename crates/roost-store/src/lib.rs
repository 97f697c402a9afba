//! Roost Store — SQLite persistence for the dashboard core.
//!
//! Owns four tables:
//!
//! - `rate_limits` — per-endpoint quota windows, written through by the
//!   gateway after every provider call
//! - `reply_suggestions` — AI-generated reply drafts, pending until posted
//! - `scheduled_posts` — posts queued for a future publish
//! - `posted_tweets` — display cache of tweets published through Roost
//!
//! All entities are owned exclusively by this layer; callers hold a
//! cheaply cloneable [`Store`] over a shared connection pool.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod store;
pub mod types;

pub use error::{Error, Result};
pub use store::Store;
pub use types::{CachedTweet, PostStatus, QuotaRecord, ScheduledPost, Suggestion, SuggestionStatus};
