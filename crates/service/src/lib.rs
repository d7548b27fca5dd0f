//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access through repository traits.
//! - Reuses validation and entity definitions in `models` crate.
//! - Ships SeaORM adapters for production and an in-memory store for tests.

pub mod clock;
pub mod destination;
pub mod errors;
pub mod mock;
pub mod pagination;
pub mod trip;
#[cfg(test)]
pub mod test_support;
#[cfg(test)]
mod repo_tests;
