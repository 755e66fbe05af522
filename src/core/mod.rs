//! Core business logic - the validation and domain-rule layer.
//!
//! Every mutating operation opens a store transaction, runs its existence and
//! consistency checks through it, writes, and commits. A failed check returns early,
//! dropping (and so rolling back) the transaction. Functions here are framework-agnostic
//! and are called by the HTTP layer in [`crate::api`].

pub mod asset;
pub mod auth;
pub mod department;
pub mod employee;
pub mod location;
pub mod report;
pub mod status;
pub mod transfer;
