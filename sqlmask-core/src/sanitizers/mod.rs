//! Turns term snapshots into compiled match specifications.
//!
//! This module owns the step between a catalog snapshot and the engine: every
//! term is normalized, de-duplicated and handed to the match-pattern builder in
//! `matcher`. Compiled sets are cached so a frequently reused snapshot is only
//! built once; the cache never changes what a sanitization pass produces.

pub mod compiler;
