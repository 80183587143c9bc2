//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod document_reader;
pub mod generation_logger;
pub mod progress;
pub mod quiz_exporter;
