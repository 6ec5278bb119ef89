use serde::Serialize;
use slotmap::{SlotMap, new_key_type};
use std::collections::VecDeque;

use crate::sim::Process;

pub type Ticks = u64;
new_key_type! {
    /// Stable handle to a task, assigned once the input has been sorted.
    pub struct TaskId;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    // Not yet admitted to the ready queue
    Pending,
    Ready,
    Running,
    Completed,
}

#[derive(Debug)]
pub struct Task {
    pub process: Process,
    pub state: TaskState,
    pub remaining: Ticks,
    pub first_run: Option<Ticks>,
    pub completion_time: Option<Ticks>,
}

impl Task {
    pub fn arrival(&self) -> Ticks {
        self.process.arrival
    }
}

/// One contiguous slice of CPU time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GanttEntry {
    pub process_id: String,
    pub start: Ticks,
    pub end: Ticks,
}

impl GanttEntry {
    pub fn duration(&self) -> Ticks {
        self.end - self.start
    }
}

#[derive(Debug)]
pub struct RunCtx {
    pub now: Ticks,
    pub tasks: SlotMap<TaskId, Task>,
    // Tasks in arrival order (stable w.r.t. input order)
    pub order: Vec<TaskId>,
    pub ready: VecDeque<TaskId>,
    pub gantt: Vec<GanttEntry>,

    // Index into `order` of the first task still Pending
    admit_cursor: usize,
}

impl RunCtx {
    /// Builds the run state from processes already sorted by arrival.
    pub fn new(sorted: Vec<Process>) -> Self {
        let mut tasks = SlotMap::with_capacity_and_key(sorted.len());
        let order = sorted
            .into_iter()
            .map(|process| {
                tasks.insert(Task {
                    remaining: process.burst,
                    process,
                    state: TaskState::Pending,
                    first_run: None,
                    completion_time: None,
                })
            })
            .collect();

        Self {
            now: 0,
            tasks,
            order,
            ready: VecDeque::new(),
            gantt: Vec::new(),
            admit_cursor: 0,
        }
    }

    pub fn task(&self, task_id: TaskId) -> &Task {
        &self.tasks[task_id]
    }

    pub fn task_mut(&mut self, task_id: TaskId) -> &mut Task {
        &mut self.tasks[task_id]
    }

    pub fn advance_time(&mut self, delta: Ticks) {
        self.now = self.now.saturating_add(delta);
    }

    pub fn jump_to(&mut self, at: Ticks) {
        debug_assert!(at >= self.now, "clock must never run backwards");
        self.now = at;
    }

    /// The earliest task that has never been enqueued. Admission always
    /// consumes a prefix of `order`, so this is the task under the cursor.
    pub fn next_pending_arrival(&self) -> Option<TaskId> {
        self.order.get(self.admit_cursor).copied()
    }

    /// Pending tasks that have arrived by `now`, in arrival order.
    pub fn arrived_pending(&self) -> Vec<TaskId> {
        self.order[self.admit_cursor..]
            .iter()
            .copied()
            .take_while(|&id| self.task(id).arrival() <= self.now) // contiguous, since `order` is sorted
            .collect()
    }

    /// Appends a task to the ready queue for the first time.
    pub fn admit(&mut self, task_id: TaskId) {
        debug_assert_eq!(
            self.order.get(self.admit_cursor),
            Some(&task_id),
            "Tasks must be admitted in arrival order"
        );
        let task = self.task_mut(task_id);
        debug_assert_eq!(
            task.state,
            TaskState::Pending,
            "Task {} admitted twice",
            task.process.id
        );
        task.state = TaskState::Ready;
        self.ready.push_back(task_id);
        self.admit_cursor += 1;
    }

    pub fn requeue(&mut self, task_id: TaskId) {
        let task = self.task_mut(task_id);
        debug_assert!(task.remaining > 0, "Finished task {} requeued", task.process.id);
        task.state = TaskState::Ready;
        self.ready.push_back(task_id);
    }

    pub fn pop_ready(&mut self) -> Option<TaskId> {
        self.ready.pop_front()
    }

    // Return the previous state
    pub fn set_running(&mut self, task_id: TaskId) -> TaskState {
        let now = self.now;
        let task = self.task_mut(task_id);
        let prev_state = task.state;
        task.state = TaskState::Running;
        task.first_run.get_or_insert(now);
        prev_state
    }

    pub fn mark_completed(&mut self, task_id: TaskId) {
        debug_assert!(!self.ready.contains(&task_id), "Completing a queued task");
        let now = self.now;
        let task = self.task_mut(task_id);
        debug_assert_eq!(task.remaining, 0);
        task.state = TaskState::Completed;
        task.completion_time = Some(now);
    }
}
