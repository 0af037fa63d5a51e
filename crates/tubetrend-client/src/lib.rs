//! Client for the Tubular Labs analytics API.
//!
//! This crate provides:
//! - Query payload builders for trend search and per-video detail lookups
//! - A thin HTTP client that POSTs payloads with the API key header
//! - Normalizers that turn raw JSON responses into typed records

pub mod client;
pub mod error;
pub mod normalize;
pub mod request;

pub use client::{ClientConfig, TubularClient, DEFAULT_BASE_URL};
pub use error::{ClientError, ClientResult, ErrorKind};
pub use normalize::{normalize_details, normalize_trends, RateLimitDetails};
pub use request::{build_detail_request, build_trend_request, TrendSearchRequest, VideoDetailRequest};
