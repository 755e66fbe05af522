//! Persistence access layer - per-entity queries against the relational store.
//!
//! This layer owns query construction and row-to-view mapping. It performs no
//! validation; the rule layer in [`crate::core`] decides what may be written.
//! Every function is generic over [`sea_orm::ConnectionTrait`] so the same query can
//! run on the pool or inside an open transaction.

pub mod assets;
pub mod departments;
pub mod employees;
pub mod locations;
pub mod statuses;
pub mod transfers;

pub use assets::{AssetFilter, AssetView};
pub use departments::DepartmentView;
pub use employees::EmployeeView;
pub use transfers::{NewLedgerEntry, TransferView};
