use crate::core::Ticks;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedCoreEvent {
    // A process entered the ready queue for the first time
    Arrived {
        task: String,
        arrival: Ticks,
        admitted_at: Ticks,
    },
    Dispatched {
        task: String,
        start: Ticks,
        slice: Ticks,
    },
    Preempted {
        task: String,
        at: Ticks,
        remaining: Ticks,
    },
    Completed {
        task: String,
        at: Ticks,
    },
    // Ready queue drained before the next arrival
    CpuIdle {
        from: Ticks,
        until: Ticks,
    },
}
