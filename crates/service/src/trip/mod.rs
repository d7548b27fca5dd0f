//! Trips: scheduled stays at a destination with a date window and a price.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::TripService;
