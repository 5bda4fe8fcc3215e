//! One-shot deferred tasks
//!
//! The scene owns at most one pending reset. Arming a new one cancels the old
//! one; each arm gets a fresh `TaskId` so stale handles can't cancel a newer
//! task.

/// Identity of an armed task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

/// A task waiting for its due time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingTask {
    pub id: TaskId,
    /// Wall-clock seconds
    pub due_at: f64,
}

/// Single-slot cancel-and-replace scheduler
#[derive(Debug, Clone, Default)]
pub struct DeferredTask {
    pending: Option<PendingTask>,
    next_id: u64,
}

impl DeferredTask {
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the task to fire at `due_at`, replacing any pending one
    pub fn arm(&mut self, due_at: f64) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        if let Some(old) = self.pending.replace(PendingTask { id, due_at }) {
            log::debug!("Replacing pending task {:?}", old.id);
        }
        id
    }

    /// Cancel whatever is pending
    pub fn cancel(&mut self) -> Option<TaskId> {
        self.pending.take().map(|task| task.id)
    }

    /// Cancel only if `id` is still the pending task
    pub fn cancel_if(&mut self, id: TaskId) -> bool {
        if self.pending.is_some_and(|task| task.id == id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> Option<PendingTask> {
        self.pending
    }

    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the task if it is due at `now`
    pub fn poll(&mut self, now: f64) -> Option<TaskId> {
        match self.pending {
            Some(task) if now >= task.due_at => {
                self.pending = None;
                Some(task.id)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once_when_due() {
        let mut task = DeferredTask::new();
        let id = task.arm(10.0);
        assert_eq!(task.poll(9.99), None);
        assert_eq!(task.poll(10.0), Some(id));
        assert_eq!(task.poll(11.0), None);
        assert!(!task.is_armed());
    }

    #[test]
    fn test_rearm_replaces() {
        let mut task = DeferredTask::new();
        let first = task.arm(5.0);
        let second = task.arm(8.0);
        assert_ne!(first, second);

        // The first deadline no longer fires
        assert_eq!(task.poll(6.0), None);
        assert_eq!(task.poll(8.0), Some(second));
    }

    #[test]
    fn test_stale_handle_cannot_cancel() {
        let mut task = DeferredTask::new();
        let stale = task.arm(5.0);
        let live = task.arm(5.0);

        assert!(!task.cancel_if(stale));
        assert!(task.is_armed());
        assert!(task.cancel_if(live));
        assert!(!task.is_armed());
    }

    #[test]
    fn test_cancel_returns_pending_id() {
        let mut task = DeferredTask::new();
        assert_eq!(task.cancel(), None);
        let id = task.arm(1.0);
        assert_eq!(task.cancel(), Some(id));
        assert_eq!(task.poll(100.0), None);
    }
}
