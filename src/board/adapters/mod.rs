//! Adapter implementations for the task board ports.

pub mod file;
pub mod memory;
