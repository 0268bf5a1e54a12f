//! Goal Planning Engine
//!
//! A household financial planning engine that:
//! - Tracks savings goals and their progress
//! - Proposes goals automatically from household records
//! - Splits a monthly surplus across goals by deadline priority
//! - Scores the investment portfolio for risk, return and concentration
//! - Produces prioritized recommendations
//!
//! FLOW:
//! RECORDS → AUTO-GOALS → ALLOCATE → ANALYZE → RECOMMEND

pub mod allocation;
pub mod analytics;
pub mod cashflow;
pub mod config;
pub mod engine;
pub mod error;
pub mod goals;
pub mod models;
pub mod recommendations;
pub mod rules;
pub mod state;

pub use error::Result;

// Re-export common types
pub use models::*;
pub use config::EngineConfig;
pub use engine::PlanningEngine;
