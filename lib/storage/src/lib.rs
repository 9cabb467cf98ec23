//! Graph projection over quad storages, and an in-memory quad storage.

pub mod graph;
pub mod memory;
