//! Core data structures for the Terrarium simulation.

pub mod entity;
pub mod environment;
pub mod genotype;
