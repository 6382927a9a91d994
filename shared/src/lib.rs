//! Shared core of the Tomato Farm form enhancer
//!
//! Everything here is independent of the browser: the wasm crate supplies
//! [`dom::Page`], [`schedule::Scheduler`] and [`schedule::Clock`]
//! implementations backed by `web-sys`, while tests use [`memory::MemoryPage`]
//! and [`schedule::VirtualScheduler`].

pub mod config;
pub mod dom;
pub mod enhancer;
pub mod error;
pub mod memory;
pub mod models;
pub mod parsing;
pub mod schedule;
pub mod types;

pub use config::*;
pub use enhancer::*;
pub use error::*;
pub use models::*;
pub use types::*;
