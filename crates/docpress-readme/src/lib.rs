//! ReadMe-style hosted docs API client and sync driver.
//!
//! Provides a synchronous REST client ([`ReadMeClient`]) addressing
//! categories and documents by slug under a fixed API base path with a
//! version header, and a sync driver ([`sync_hierarchy`]) that mirrors a
//! local document hierarchy onto the service, preserving order and nesting.

mod client;
mod error;
mod sync;
mod types;

pub use client::{API_BASE, ReadMeClient};
pub use error::ReadMeError;
pub use sync::{SyncError, SyncOptions, SyncReport, sync_hierarchy};
pub use types::{Category, RemoteDoc, Version};
