// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod category_store;

pub use category_store::InMemoryCategoryStore;
