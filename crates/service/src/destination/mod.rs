//! Destinations: domain types, repository port, SeaORM adapter and the
//! service enforcing case-insensitive name uniqueness.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::DestinationService;
