use average::Mean;
use serde::Serialize;

use crate::core::Ticks;
use crate::sim::SimulationResult;

/// Read-only summary of one [`SimulationResult`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    /// End of the last Gantt slice.
    pub total_time: Ticks,
    pub total_burst: Ticks,
    /// Busy share of `total_time`, in percent.
    pub cpu_utilization: f64,
    /// Completed processes per tick.
    pub throughput: f64,
    /// Turnaround over burst, one per process in result order.
    pub response_ratios: Vec<f64>,
    pub avg_response_ratio: f64,
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub avg_response: f64,
    pub context_switches: usize,
}

/// Derives [`Metrics`] from a run.
///
/// Never fails: a zero `total_time` yields zero utilization and throughput,
/// and a zero burst yields an infinite response ratio.
pub fn analyze(result: &SimulationResult) -> Metrics {
    let total_time = result.makespan();
    let total_burst = result.total_burst();

    let (cpu_utilization, throughput) = if total_time == 0 {
        (0.0, 0.0)
    } else {
        (
            total_burst as f64 / total_time as f64 * 100.0,
            result.processes.len() as f64 / total_time as f64,
        )
    };

    let response_ratios: Vec<f64> = result
        .processes
        .iter()
        .map(|row| response_ratio(row.turnaround, row.process.burst))
        .collect();

    Metrics {
        total_time,
        total_burst,
        cpu_utilization,
        throughput,
        avg_response_ratio: mean_ratio(&response_ratios),
        response_ratios,
        avg_waiting: result.avg_waiting(),
        avg_turnaround: result.avg_turnaround(),
        avg_response: result.avg_response(),
        context_switches: result.context_switches,
    }
}

pub fn response_ratio(turnaround: Ticks, burst: Ticks) -> f64 {
    if burst == 0 {
        return f64::INFINITY;
    }
    turnaround as f64 / burst as f64
}

// Incremental means turn inf - inf into NaN, so infinity short-circuits.
fn mean_ratio(ratios: &[f64]) -> f64 {
    if ratios.iter().any(|r| r.is_infinite()) {
        return f64::INFINITY;
    }
    ratios.iter().copied().collect::<Mean>().mean()
}
