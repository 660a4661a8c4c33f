//! SeaORM entities backing the PostgreSQL store.

pub mod category;
pub mod post;
pub mod user;
