//! Concrete wizard flows built on the engine

pub mod discovery;
pub mod project;
