// sqlmask-core/src/engines/mod.rs
//! Concrete implementations of the `SanitizationEngine` trait.

pub mod term_engine;
