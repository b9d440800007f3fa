//! HTTP support shared by the storage client.

pub mod retry;

pub use retry::{RetryConfig, RetryPolicy};
