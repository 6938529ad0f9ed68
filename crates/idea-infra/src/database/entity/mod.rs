//! SeaORM entities.

pub mod idea;
