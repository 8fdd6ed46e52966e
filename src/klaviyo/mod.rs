//! Klaviyo API access.
//!
//! This module provides the paginated events-API client.

pub mod client;

pub use client::{ApiError, EventSource, KlaviyoClient};
