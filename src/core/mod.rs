//! Core business logic: the profile model, decision rules and report layout

pub mod config;
pub mod engine;
pub mod log;
pub mod profile;
pub mod report;

// Re-export main types for cleaner imports
pub use engine::{Recommendation, evaluate};
pub use profile::{FinancialProfile, Goal, RiskTolerance};
pub use report::{Report, render};
