//! Process environment

mod environment;

pub use environment::Environment;
