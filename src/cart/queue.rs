//! Remote Write Queue
//!
//! Keeps at most one remote cart write in flight. Snapshots submitted while a
//! write is running replace each other; only the latest is sent next.

#[derive(Debug)]
pub struct WriteQueue<T> {
    in_flight: bool,
    pending: Option<T>,
    superseded: u64,
}

impl<T> Default for WriteQueue<T> {
    fn default() -> Self {
        Self {
            in_flight: false,
            pending: None,
            superseded: 0,
        }
    }
}

impl<T> WriteQueue<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offer a snapshot. Returns it back when the caller should start
    /// writing now; otherwise it is parked until the running write finishes.
    pub fn submit(&mut self, snapshot: T) -> Option<T> {
        if !self.in_flight {
            self.in_flight = true;
            return Some(snapshot);
        }
        if self.pending.replace(snapshot).is_some() {
            self.superseded += 1;
        }
        None
    }

    /// Mark the running write as done. Returns the next snapshot to write,
    /// if one was parked meanwhile.
    pub fn finish(&mut self) -> Option<T> {
        let next = self.pending.take();
        self.in_flight = next.is_some();
        next
    }

    /// Drop the parked snapshot, if any. The running write is unaffected.
    pub fn drop_pending(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_idle(&self) -> bool {
        !self.in_flight
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Snapshots dropped because a newer one replaced them before sending
    pub fn superseded(&self) -> u64 {
        self.superseded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_idle_queue_starts_immediately() {
        let mut queue = WriteQueue::new();
        assert!(queue.is_idle());
        assert_eq!(queue.submit(1), Some(1));
        assert!(!queue.is_idle());
        assert_eq!(queue.finish(), None);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_only_latest_pending_is_sent() {
        let mut queue = WriteQueue::new();
        assert_eq!(queue.submit("a"), Some("a"));
        assert_eq!(queue.submit("b"), None);
        assert_eq!(queue.submit("c"), None);
        assert!(queue.has_pending());
        assert_eq!(queue.superseded(), 1);

        assert_eq!(queue.finish(), Some("c"));
        assert!(!queue.is_idle());
        assert_eq!(queue.finish(), None);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_drop_pending_keeps_running_write() {
        let mut queue = WriteQueue::new();
        queue.submit(1);
        queue.submit(2);
        assert!(queue.drop_pending());
        assert!(!queue.drop_pending());
        assert!(!queue.is_idle());
        assert_eq!(queue.finish(), None);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_submit_after_drain_starts_again() {
        let mut queue = WriteQueue::new();
        queue.submit(1);
        queue.finish();
        assert_eq!(queue.submit(2), Some(2));
    }
}
