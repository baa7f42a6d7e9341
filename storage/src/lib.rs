//! # FreshCart Storage
//!
//! Best-effort local key-value persistence for the storefront.
//!
//! Everything in this crate is opportunistic by contract: reads that fail to
//! parse degrade to the empty default, writes that fail are logged and
//! dropped, and nothing here ever propagates an error to the caller. The
//! stores treat this surface as an external collaborator — losing a saved
//! location is acceptable; blocking the UI on one is not.
//!
//! ## Persisted surfaces
//!
//! - [`recents::RecentList::saved_locations`]: up to 5 address display
//!   strings, newest first, deduplicated by exact match
//! - [`recents::RecentList::recent_searches`]: same shape for free-text
//!   search strings
//! - [`address_book::AddressBook`]: full address detail records keyed by
//!   their display string

pub mod address_book;
pub mod kv;
pub mod recents;

pub use address_book::{AddressBook, AddressRecord, Coordinates};
pub use kv::{DirKv, KeyValue, MemoryKv};
pub use recents::RecentList;
