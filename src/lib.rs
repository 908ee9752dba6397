//! Spatial Dilemma - evolutionary Prisoner's Dilemma on a grid

pub mod core;
pub mod persistence;
pub mod simulation;
