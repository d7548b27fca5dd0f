//! SeaORM entities for the travel catalogue plus the field-level validators
//! shared by the HTTP boundary and the repositories.

pub mod errors;
pub mod db;
pub mod destination;
pub mod trip;

#[cfg(test)]
mod tests;
