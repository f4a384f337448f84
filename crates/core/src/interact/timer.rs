//! Virtual-clock scheduler for one-shot deferred tasks.

use std::collections::BTreeMap;

/// Cancellation handle for a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle {
    id: u64,
    due_ms: u64,
}

impl TaskHandle {
    pub fn due_ms(&self) -> u64 {
        self.due_ms
    }
}

/// One-shot tasks ordered by due time, then by scheduling order.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: u64,
    next_id: u64,
    queue: BTreeMap<(u64, u64), T>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self {
            now_ms: 0,
            next_id: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) -> TaskHandle {
        let handle = TaskHandle {
            id: self.next_id,
            due_ms: self.now_ms.saturating_add(delay_ms),
        };
        self.next_id += 1;
        self.queue.insert((handle.due_ms, handle.id), task);
        handle
    }

    /// Cancel a pending task. Returns the task if it had not run yet.
    pub fn cancel(&mut self, handle: TaskHandle) -> Option<T> {
        self.queue.remove(&(handle.due_ms, handle.id))
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.queue.contains_key(&(handle.due_ms, handle.id))
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Move the clock forward and return every task that became due, in due order.
    pub fn advance(&mut self, ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(ms);
        let later = self.queue.split_off(&(self.now_ms.saturating_add(1), 0));
        let due = std::mem::replace(&mut self.queue, later);
        due.into_values().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_in_due_order() {
        let mut s = Scheduler::new();
        s.schedule(1200, "restore");
        s.schedule(900, "clear");
        assert!(s.advance(899).is_empty());
        assert_eq!(s.advance(1), vec!["clear"]);
        assert_eq!(s.advance(300), vec!["restore"]);
        assert_eq!(s.pending(), 0);
    }

    #[test]
    fn test_cancelled_task_never_runs() {
        let mut s = Scheduler::new();
        let h = s.schedule(10, 1);
        assert!(s.is_pending(h));
        assert_eq!(s.cancel(h), Some(1));
        assert_eq!(s.cancel(h), None);
        assert!(s.advance(100).is_empty());
    }

    #[test]
    fn test_same_due_time_keeps_schedule_order() {
        let mut s = Scheduler::new();
        s.schedule(5, 'a');
        s.schedule(5, 'b');
        assert_eq!(s.advance(5), vec!['a', 'b']);
    }
}
