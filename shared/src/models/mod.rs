//! Domain models for the tomato farm forms

mod sale;
mod variety;

pub use sale::*;
pub use variety::*;
