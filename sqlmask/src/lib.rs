// sqlmask/src/lib.rs
//! # SQLMask CLI Application
//!
//! This crate provides the command-line interface for the `sqlmask-core`
//! masking engine: sanitizing and scanning text, and maintaining the term
//! catalog on disk.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
pub mod utils;

pub use commands::run;
