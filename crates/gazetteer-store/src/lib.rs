//! Gazetteer Store - Storage backends for the address book
//!
//! Backends implement [`gazetteer_core::AddressStore`] and own record
//! identity: they assign ids, stamp timestamps, and guard their own
//! synchronization. The search pipeline only ever sees snapshots.
//!
//! # Modules
//!
//! - [`memory`] - In-memory store backed by a read/write-locked map

pub mod memory;

// Re-exports for convenience
pub use memory::MemoryStore;
