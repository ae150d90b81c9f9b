//! Core type definitions used across the Storeroom workspace.

pub mod id;

pub use id::*;
