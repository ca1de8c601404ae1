// src/infrastructure/mod.rs
pub mod database;
pub mod migrator;
pub mod repositories;
pub mod time;
pub mod util;
