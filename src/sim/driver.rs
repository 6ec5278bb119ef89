use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use super::{job::Process, result::SimulationResult};
use crate::{
    core::{SchedCore, SchedCoreEvent, Ticks},
    error::InvalidInput,
};

/// A Round-Robin run that can be driven one slice at a time.
pub struct Sim {
    pub core: SchedCore,
    started: bool,
}

impl Sim {
    /// Validates the workload and sorts a private copy of it by arrival.
    /// Equal arrivals keep their input order.
    pub fn new(processes: &[Process], quantum: Ticks) -> Result<Self, InvalidInput> {
        validate(processes, quantum)?;

        let mut sorted = processes.to_vec();
        sorted.sort_by_key(|p| p.arrival);

        debug!(processes = sorted.len(), quantum, "starting round-robin run");
        Ok(Self {
            core: SchedCore::new(sorted, quantum),
            started: false,
        })
    }

    /// Runs one slice (seeding the ready queue first on the initial call) and
    /// returns what happened.
    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();
        if !self.started {
            self.started = true;
            events.extend(self.core.seed());
        }
        events.extend(self.core.step());

        for event in &events {
            trace!(now = self.core.now(), ?event, "sched event");
        }
        events
    }

    pub fn all_jobs_completed(&self) -> bool {
        self.started && self.core.is_finished()
    }

    /// Drives the run to completion.
    pub fn run(mut self) -> SimulationResult {
        while !self.all_jobs_completed() {
            self.step();
        }

        let result = SimulationResult::from_ctx(&self.core.ctx, self.core.quantum());
        debug!(
            makespan = result.makespan(),
            slices = result.gantt.len(),
            context_switches = result.context_switches,
            steps = self.core.observer().steps(),
            "round-robin run finished"
        );
        result
    }
}

/// Schedules `processes` Round-Robin with the given quantum.
///
/// The caller's slice is never reordered or mutated.
pub fn simulate(processes: &[Process], quantum: Ticks) -> Result<SimulationResult, InvalidInput> {
    Ok(Sim::new(processes, quantum)?.run())
}

pub fn validate(processes: &[Process], quantum: Ticks) -> Result<(), InvalidInput> {
    if quantum == 0 {
        return Err(InvalidInput::NonPositiveQuantum { quantum: 0 });
    }
    if processes.is_empty() {
        return Err(InvalidInput::EmptyWorkload);
    }

    let mut seen = FxHashSet::default();
    let mut total_burst: Ticks = 0;
    for process in processes {
        if process.burst == 0 {
            return Err(InvalidInput::NonPositiveBurst {
                id: process.id.clone(),
                burst: 0,
            });
        }
        if !seen.insert(process.id.as_str()) {
            return Err(InvalidInput::DuplicateId {
                id: process.id.clone(),
            });
        }
        total_burst = total_burst
            .checked_add(process.burst)
            .ok_or_else(|| InvalidInput::ClockOverflow {
                id: process.id.clone(),
            })?;
    }

    // No run can end later than the last arrival plus all the work there is.
    let Some(last) = processes.iter().max_by_key(|p| p.arrival) else {
        return Err(InvalidInput::EmptyWorkload);
    };
    last.arrival
        .checked_add(total_burst)
        .ok_or_else(|| InvalidInput::ClockOverflow {
            id: last.id.clone(),
        })?;
    Ok(())
}
