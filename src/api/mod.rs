//! Backend API integration module
//!
//! Handles REST API calls, the sample data set, and data parsing for
//! the dashboard feed.

pub mod feed;
pub mod rest;
pub mod sample;
pub mod types;

// Re-export commonly used types
pub use feed::{DataFeed, RestFeed};
pub use rest::ApiClient;
pub use sample::SampleFeed;
pub use types::*;
