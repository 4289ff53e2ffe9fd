//! Kanban task board with optimistic remote synchronisation.
//!
//! Tasks live in three status partitions (`Pending`, `InProgress`, `Done`).
//! Every write is applied locally first and then confirmed against a remote
//! document store; failed writes are rolled back and surfaced as
//! notifications. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The task store and board controller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
