//! Bundlr storage slice: wire types, the ANS-104 data item, and the node
//! client used by the upload command.

pub mod client;
pub mod item;
pub mod wire;

pub use client::BundlrClient;
pub use item::{DataItem, Tag};
pub use wire::{BalanceResponse, NodeInfo, UploadReceipt};
