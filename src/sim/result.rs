use average::Mean;
use serde::Serialize;

use super::job::ProcessStats;
use crate::core::{GanttEntry, RunCtx, Ticks};

/// Everything one Round-Robin run produced. Rows are in arrival order, ties
/// in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SimulationResult {
    pub quantum: Ticks,
    pub processes: Vec<ProcessStats>,
    pub gantt: Vec<GanttEntry>,
    pub context_switches: usize,
}

impl SimulationResult {
    pub(crate) fn from_ctx(ctx: &RunCtx, quantum: Ticks) -> Self {
        let processes = ctx
            .order
            .iter()
            .map(|&task_id| {
                let task = ctx.task(task_id);
                let completion = task
                    .completion_time
                    .expect("Finished run left a task without completion time");
                let first_run = task
                    .first_run
                    .expect("Finished run left a task that never ran");
                let arrival = task.process.arrival;
                let turnaround = completion - arrival;
                ProcessStats {
                    process: task.process.clone(),
                    completion,
                    turnaround,
                    waiting: turnaround - task.process.burst,
                    response: first_run - arrival,
                }
            })
            .collect();

        Self {
            quantum,
            processes,
            context_switches: context_switches(&ctx.gantt),
            gantt: ctx.gantt.clone(),
        }
    }

    pub fn get(&self, id: &str) -> Option<&ProcessStats> {
        self.processes.iter().find(|row| row.process.id == id)
    }

    /// End of the last slice, or 0 for an empty trace.
    pub fn makespan(&self) -> Ticks {
        self.gantt.last().map_or(0, |entry| entry.end)
    }

    pub fn total_burst(&self) -> Ticks {
        self.processes.iter().map(|row| row.process.burst).sum()
    }

    pub fn avg_waiting(&self) -> f64 {
        avg(self.processes.iter().map(|row| row.waiting))
    }

    pub fn avg_turnaround(&self) -> f64 {
        avg(self.processes.iter().map(|row| row.turnaround))
    }

    pub fn avg_response(&self) -> f64 {
        avg(self.processes.iter().map(|row| row.response))
    }
}

/// Adjacent slices that belong to different processes.
pub fn context_switches(gantt: &[GanttEntry]) -> usize {
    gantt
        .windows(2)
        .filter(|pair| pair[0].process_id != pair[1].process_id)
        .count()
}

// Mean of an empty set is 0
fn avg(iter: impl Iterator<Item = Ticks>) -> f64 {
    iter.map(|t| t as f64).collect::<Mean>().mean()
}
