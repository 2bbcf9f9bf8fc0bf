//! HTTP client module
//!
//! Provides the HTTP client every OData service call goes through.
//!
//! # Features
//!
//! - **Authentication**: Basic credentials via the auth module
//! - **Rate Limiting**: Optional token bucket pacing using governor
//! - **Status Mapping**: Non-2xx answers become transport errors, 401 is
//!   reported on its own

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
