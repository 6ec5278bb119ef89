use super::state::{RunCtx, TaskState};

/// Checks run-state invariants after every scheduling step (debug builds).
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self { step: 0 }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe(&mut self, ctx: &RunCtx) {
        self.step += 1;
        if !cfg!(debug_assertions) {
            return;
        }

        for &task_id in &ctx.ready {
            let task = ctx.task(task_id);
            let name = &task.process.id;
            debug_assert_eq!(
                task.state,
                TaskState::Ready,
                "Queued task {name} must be Ready"
            );
            debug_assert!(task.remaining > 0, "Finished task {name} still queued");
        }

        // Every queued task is Ready, so equal counts rule out duplicates
        let ready_tasks = ctx
            .tasks
            .values()
            .filter(|task| task.state == TaskState::Ready)
            .count();
        debug_assert_eq!(
            ready_tasks,
            ctx.ready.len(),
            "Ready tasks and queue membership disagree"
        );

        for task in ctx.tasks.values() {
            debug_assert_ne!(
                task.state,
                TaskState::Running,
                "Task {} left Running between steps",
                task.process.id
            );
            debug_assert_eq!(
                task.state == TaskState::Completed,
                task.completion_time.is_some(),
                "Task {} completion bookkeeping mismatch",
                task.process.id
            );
        }

        // Earlier slices were checked on earlier steps
        if let [.., prev, last] = ctx.gantt.as_slice() {
            debug_assert!(
                last.start >= prev.end,
                "Gantt slices overlap: {prev:?} then {last:?}"
            );
        }
        if let Some(last) = ctx.gantt.last() {
            debug_assert!(ctx.now >= last.end, "clock behind the last slice");
        }
    }
}
