//! # IO Module
//!
//! Interface layer between HTTP clients and the domain services.
//!
//! Requests arrive as the JSON DTOs of the `shared` crate, are mapped to
//! domain commands, and domain results or [`BankError`](crate::domain::BankError)s
//! are mapped back to DTOs and status codes. No business rule lives here.

pub mod rest;
