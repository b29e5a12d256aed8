// sqlmask/src/utils/mod.rs
pub mod catalog_store;
