//! # Cookbook Core
//!
//! The domain layer of the cookbook publishing backend: entities, ports and
//! the authenticated mutation services. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
