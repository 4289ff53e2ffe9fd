//! `CheckItOut`: a Kanban task board kept in sync with a remote document
//! store.
//!
//! The crate is the core behind a board view: it holds tasks in three status
//! columns, applies every user intent locally first, confirms it against the
//! remote store, and rolls back when the store rejects the write.
//!
//! # Architecture
//!
//! `CheckItOut` follows hexagonal architecture principles:
//!
//! - **Domain**: Pure task, status and date logic with no infrastructure
//!   dependencies
//! - **Ports**: Abstract trait interfaces for the remote store, due-date
//!   advisor, assignee persistence and notifications
//! - **Adapters**: Concrete implementations of ports (in-memory, filesystem)
//!
//! # Modules
//!
//! - [`board`]: Task store, board controller and their collaborators

pub mod board;
