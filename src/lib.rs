//! TOTE: pari-mutuel pool and dividend calculator
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.

pub mod config;
pub mod types;
pub mod money;
pub mod pools;
pub mod parser;
pub mod engine;
pub mod report;
pub mod session;
