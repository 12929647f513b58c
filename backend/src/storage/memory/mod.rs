//! # In-Memory Storage Module
//!
//! Process-local storage holding every table in one map-based store. Nothing
//! survives a restart; used by tests and for demo runs of the service.

pub mod connection;
pub mod repositories;

pub use connection::MemoryConnection;
pub use repositories::{MemoryAccountRepository, MemoryCustomerRepository, MemoryRecipientRepository};
