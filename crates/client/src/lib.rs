//! TeamDesk notification client.
//!
//! This crate contains:
//! - The JSON-over-HTTP API client for the notification endpoints
//! - Session context with an `init -> active -> invalidated` lifecycle
//! - The client-side notification feed with optimistic read-state
//! - A polling loop with backoff, jitter and pause-on-failure

pub mod api;
pub mod config;
pub mod error;
pub mod feed;
pub mod logging;
pub mod metrics;
pub mod parse;
pub mod poller;
pub mod session;

pub use api::NotificationApi;
pub use config::ClientConfig;
pub use error::ClientError;
pub use feed::{Feed, FeedService, ReadReceipt};
pub use session::Session;
