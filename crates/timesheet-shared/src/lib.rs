//! Code shared between the timesheet clients

#![warn(unused_crate_dependencies)]


pub mod const_config;
pub mod errors;
pub mod id;
mod macros;
pub mod models;
pub mod req_args;
pub mod uac;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
