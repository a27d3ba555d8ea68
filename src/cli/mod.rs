//! Command implementations and terminal presentation helpers

pub mod advise;
pub mod interactive;
pub mod setup;
pub mod ui;
