//! # Storage Module
//!
//! Handles all data persistence for the back-office service.
//!
//! The domain layer only sees the traits in [`traits`]; two backends
//! implement them:
//!
//! - **sqlite**: durable storage through SQLx
//! - **memory**: a map-based store for tests and demos
//!
//! Both are selected through the [`Connection`] factory trait, so services
//! are written once and run unchanged on either backend.

pub mod memory;
pub mod sqlite;
pub mod traits;

pub use memory::MemoryConnection;
pub use sqlite::SqliteConnection;
pub use traits::{AccountStorage, Connection, CustomerStorage, RecipientStorage};
