//! Utility helpers for the notarization engine.

pub mod parallel;

pub use parallel::{parallelism_enabled, set_parallelism, ParallelismGuard};
