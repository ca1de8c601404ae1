// src/domain/mod.rs
pub mod category;
pub mod errors;
