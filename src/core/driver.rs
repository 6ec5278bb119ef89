use super::{
    event::SchedCoreEvent,
    observer::Observer,
    state::{GanttEntry, RunCtx, TaskId, Ticks},
};
use crate::sim::Process;

pub struct SchedCore {
    pub ctx: RunCtx,
    quantum: Ticks,
    observer: Observer,
}

impl SchedCore {
    /// `sorted` must already be ordered by arrival; `quantum` must be non-zero.
    pub fn new(sorted: Vec<Process>, quantum: Ticks) -> Self {
        debug_assert!(quantum > 0, "quantum must be positive");
        debug_assert!(
            sorted.windows(2).all(|w| w[0].arrival <= w[1].arrival),
            "processes must be sorted by arrival"
        );
        Self {
            ctx: RunCtx::new(sorted),
            quantum,
            observer: Observer::new(),
        }
    }

    /// Starts the clock at the earliest arrival and fills the ready queue with
    /// everything that has arrived by then.
    pub fn seed(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();

        if let Some(&first) = self.ctx.order.first() {
            let earliest = self.ctx.task(first).arrival();
            if earliest > 0 {
                self.ctx.jump_to(earliest);
            }
        }

        self.admit_arrivals(&mut events);
        if self.ctx.ready.is_empty() {
            self.idle_fill(&mut events);
        }

        self.observer.observe(&self.ctx);
        events
    }

    /// Runs the head of the ready queue for one slice. Returns no events once
    /// the queue has drained.
    pub fn step(&mut self) -> Vec<SchedCoreEvent> {
        let mut events = Vec::new();
        let Some(task_id) = self.ctx.pop_ready() else {
            return events;
        };

        self.ctx.set_running(task_id);
        let name = self.name(task_id);
        let start = self.ctx.now;
        let slice = self.ctx.task(task_id).remaining.min(self.quantum);
        self.ctx.gantt.push(GanttEntry {
            process_id: name.clone(),
            start,
            end: start + slice,
        });
        events.push(SchedCoreEvent::Dispatched {
            task: name.clone(),
            start,
            slice,
        });

        self.ctx.advance_time(slice);
        let remaining = {
            let task = self.ctx.task_mut(task_id);
            task.remaining -= slice;
            task.remaining
        };

        // Newcomers queue ahead of the task coming off the CPU
        self.admit_arrivals(&mut events);

        if remaining > 0 {
            self.ctx.requeue(task_id);
            events.push(SchedCoreEvent::Preempted {
                task: name,
                at: self.ctx.now,
                remaining,
            });
        } else {
            self.ctx.mark_completed(task_id);
            events.push(SchedCoreEvent::Completed {
                task: name,
                at: self.ctx.now,
            });
        }

        // With the queue drained, only never-admitted tasks can have work left
        if self.ctx.ready.is_empty() {
            self.idle_fill(&mut events);
        }

        self.observer.observe(&self.ctx);
        events
    }

    pub fn is_finished(&self) -> bool {
        self.ctx.ready.is_empty() && self.ctx.next_pending_arrival().is_none()
    }

    pub fn now(&self) -> Ticks {
        self.ctx.now
    }

    pub fn quantum(&self) -> Ticks {
        self.quantum
    }

    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    fn admit_arrivals(&mut self, events: &mut Vec<SchedCoreEvent>) {
        for task_id in self.ctx.arrived_pending() {
            self.admit(task_id, events);
        }
    }

    // Jump the clock over an idle gap to the next arrival and admit only that
    // task; peers arriving at the same instant are picked up after its slice.
    fn idle_fill(&mut self, events: &mut Vec<SchedCoreEvent>) {
        let Some(task_id) = self.ctx.next_pending_arrival() else {
            return;
        };
        let from = self.ctx.now;
        let arrival = self.ctx.task(task_id).arrival();
        if arrival > from {
            self.ctx.jump_to(arrival);
            events.push(SchedCoreEvent::CpuIdle {
                from,
                until: arrival,
            });
        }
        self.admit(task_id, events);
    }

    fn admit(&mut self, task_id: TaskId, events: &mut Vec<SchedCoreEvent>) {
        self.ctx.admit(task_id);
        events.push(SchedCoreEvent::Arrived {
            task: self.name(task_id),
            arrival: self.ctx.task(task_id).arrival(),
            admitted_at: self.ctx.now,
        });
    }

    fn name(&self, task_id: TaskId) -> String {
        self.ctx.task(task_id).process.id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TaskState;

    fn core(spec: &[(&str, Ticks, Ticks)], quantum: Ticks) -> SchedCore {
        SchedCore::new(
            spec.iter()
                .map(|&(id, arrival, burst)| Process::new(id, arrival, burst))
                .collect(),
            quantum,
        )
    }

    #[test]
    fn seed_starts_clock_at_first_arrival() {
        let mut core = core(&[("P1", 3, 2), ("P2", 3, 1), ("P3", 9, 1)], 2);
        let events = core.seed();
        assert_eq!(core.now(), 3);
        assert_eq!(core.ctx.ready.len(), 2);
        assert!(matches!(&events[0], SchedCoreEvent::Arrived { task, .. } if task == "P1"));
    }

    #[test]
    fn arrival_at_slice_end_queues_before_preempted_task() {
        let mut core = core(&[("A", 0, 4), ("B", 2, 1)], 2);
        core.seed();
        let events = core.step();
        let order: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                SchedCoreEvent::Arrived { task, .. } | SchedCoreEvent::Preempted { task, .. } => {
                    Some(task.as_str())
                }
                _ => None,
            })
            .collect();
        assert_eq!(order, ["B", "A"]);
        let head = core.ctx.ready[0];
        assert_eq!(core.ctx.task(head).process.id, "B");
    }

    #[test]
    fn finished_only_once_every_task_completes() {
        let mut core = core(&[("A", 0, 2), ("B", 1, 1), ("C", 9, 3)], 2);
        assert!(!core.is_finished());

        core.seed();
        while !core.is_finished() {
            assert!(!core.step().is_empty());
        }
        assert_eq!(core.now(), 12);
        assert!(
            core.ctx
                .tasks
                .values()
                .all(|task| task.state == TaskState::Completed && task.remaining == 0)
        );
    }

    #[test]
    fn idle_gap_emits_cpu_idle() {
        let mut core = core(&[("A", 0, 1), ("B", 5, 1)], 4);
        core.seed();
        let events = core.step();
        assert!(events.contains(&SchedCoreEvent::CpuIdle { from: 1, until: 5 }));
        assert_eq!(core.now(), 5);
        core.step();
        assert!(core.is_finished());
        assert!(core.step().is_empty());
    }
}
