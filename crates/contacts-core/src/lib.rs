//! Core types and trait definitions for the client contact store.
//!
//! This crate has no database dependency. Storage backends implement
//! [`store::ClientStore`]; the CLI depends on that abstraction.

pub mod client;
pub mod outcome;
pub mod store;

pub use client::{Client, ClientId, ClientPatch, ClientRecord, NewClient, Phone, PhoneId};
pub use outcome::{Missing, Outcome, Status};
