//! One-off migration that lowercases category slugs, resolving case-only
//! duplicates within a parent, and rebuilds the slug uniqueness index on
//! `LOWER(slug)`.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
