//! Round-Robin CPU scheduling model.
//!
//! [`simulate`] runs a fixed process set under one quantum and returns the
//! Gantt trace with per-process timings; [`metrics`] summarizes runs, sweeps
//! the quantum and compares two quanta.

pub mod config;
pub mod core;
pub mod error;
pub mod metrics;
pub mod sim;
pub mod workload;

pub use error::InvalidInput;
pub use metrics::{Metrics, analyze, compare, sweep};
pub use sim::{Process, Sim, SimulationResult, simulate};
