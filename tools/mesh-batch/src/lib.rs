//! mesh-batch library
//!
//! Manifest parsing and batch generation for the `mesh-batch` tool.

pub mod batch;
pub mod manifest;
