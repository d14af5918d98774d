//! Stores functionality that should be shared between different clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions that send requests are called

#![warn(unused_crate_dependencies)]


mod backend;
mod client;
mod controller;
mod data_state;
mod store;

pub use backend::{Backend, ResponseReceiver};
pub use client::{Client, LoginOutcome, WakeFn};
pub use controller::{
    NavigationOutcome, Notice, NoticeLevel, OpenTimesheet, RedirectReason, SectionStates,
    SessionController, TopLevelView,
};
pub use data_state::{AwaitingType, DataState};
pub use store::{MemoryStore, SessionStore};
