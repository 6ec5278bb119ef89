//! Aggregate statistics over finished runs, plus quantum sweeps and
//! side-by-side comparisons that re-run the simulator.

pub mod analyze;
pub mod sweep;

pub use analyze::{Metrics, analyze};
pub use sweep::{Comparison, QuantumRun, SweepRow, compare, default_sweep_range, sweep};
