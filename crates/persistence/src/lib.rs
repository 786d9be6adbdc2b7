//! Persistence collaborators for the showroom assistant
//!
//! - `response_log`: append-only stores for accepted answers (file-backed
//!   and in-memory), with an explicit truncate for session teardown
//! - `inventory`: inventory query clients (HTTP and in-memory), normalizing
//!   collaborator records once on the way in

pub mod inventory;
pub mod response_log;

pub use inventory::{HttpInventoryClient, InMemoryInventory, InventoryConfig};
pub use response_log::{latest_by_key, FileResponseStore, MemoryResponseStore};
