#![warn(unused_crate_dependencies)]

pub mod cli;
pub mod configuration;
pub mod file_store;
pub mod runner;
pub mod runtime;
pub mod tracing;

pub use file_store::FileStore;
pub use runner::Runner;
