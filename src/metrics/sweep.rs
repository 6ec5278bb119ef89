use std::ops::Range;

use serde::Serialize;
use tracing::debug;

use super::analyze::{Metrics, analyze};
use crate::core::Ticks;
use crate::error::InvalidInput;
use crate::sim::{Process, SimulationResult, driver::validate, simulate};

/// One point of a quantum sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    pub quantum: Ticks,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub context_switches: usize,
}

/// Quanta `1 .. max(burst) + 3`, the range worth plotting for a workload.
pub fn default_sweep_range(processes: &[Process]) -> Range<Ticks> {
    let max_burst = processes.iter().map(|p| p.burst).max().unwrap_or(1);
    1..max_burst.saturating_add(3)
}

/// Re-runs the workload once per quantum. Every quantum is checked before
/// the first run.
pub fn sweep(
    processes: &[Process],
    quanta: impl IntoIterator<Item = Ticks>,
) -> Result<Vec<SweepRow>, InvalidInput> {
    let quanta: Vec<Ticks> = quanta.into_iter().collect();
    for &quantum in &quanta {
        validate(processes, quantum)?;
    }

    quanta
        .into_iter()
        .map(|quantum| {
            let result = simulate(processes, quantum)?;
            Ok(SweepRow {
                quantum,
                avg_waiting: result.avg_waiting(),
                avg_turnaround: result.avg_turnaround(),
                context_switches: result.context_switches,
            })
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuantumRun {
    pub quantum: Ticks,
    pub result: SimulationResult,
    pub metrics: Metrics,
}

impl QuantumRun {
    fn new(processes: &[Process], quantum: Ticks) -> Result<Self, InvalidInput> {
        let result = simulate(processes, quantum)?;
        let metrics = analyze(&result);
        Ok(Self {
            quantum,
            result,
            metrics,
        })
    }
}

/// Two independent runs of the same workload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub left: QuantumRun,
    pub right: QuantumRun,
}

impl Comparison {
    pub fn into_parts(self) -> (SimulationResult, SimulationResult, Metrics, Metrics) {
        (
            self.left.result,
            self.right.result,
            self.left.metrics,
            self.right.metrics,
        )
    }
}

/// Runs the workload under `q1` and `q2`. Both quanta are checked before
/// either run starts.
pub fn compare(processes: &[Process], q1: Ticks, q2: Ticks) -> Result<Comparison, InvalidInput> {
    validate(processes, q1)?;
    validate(processes, q2)?;

    let comparison = Comparison {
        left: QuantumRun::new(processes, q1)?,
        right: QuantumRun::new(processes, q2)?,
    };
    debug!(
        q1,
        q2,
        avg_waiting_q1 = comparison.left.metrics.avg_waiting,
        avg_waiting_q2 = comparison.right.metrics.avg_waiting,
        "compared quanta"
    );
    Ok(comparison)
}
