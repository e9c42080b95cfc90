//! Quiet-period coalescing of bursty input.
//!
//! Time is an explicit millisecond clock supplied by the caller, so the
//! host event loop owns the clock and tests never sleep.

/// Holds the latest queued value until no newer value has arrived for
/// `delay_ms`.
///
/// Every [`queue`](Self::queue) replaces the pending value and restarts the
/// quiet period; [`take_ready`](Self::take_ready) yields the value once the
/// period has elapsed.
///
/// ```
/// use quillpane::debounce::Debouncer;
///
/// let mut d = Debouncer::new(300);
/// d.queue("a", 0);
/// d.queue("ab", 10);
/// assert_eq!(d.take_ready(300), None);
/// assert_eq!(d.take_ready(310), Some("ab"));
/// ```
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay_ms: u64,
    pending: Option<(T, u64)>,
}

impl<T> Debouncer<T> {
    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    pub const fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Replace the pending value and restart the quiet period at `now_ms`.
    pub fn queue(&mut self, value: T, now_ms: u64) {
        self.pending = Some((value, now_ms));
    }

    /// Take the pending value if it has been stable for the full delay.
    pub fn take_ready(&mut self, now_ms: u64) -> Option<T> {
        let queued_at = self.pending.as_ref()?.1;
        if now_ms.saturating_sub(queued_at) >= self.delay_ms {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Take the pending value regardless of the quiet period.
    pub fn take_now(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// Deadline at which the pending value becomes ready, if any.
    pub fn ready_at(&self) -> Option<u64> {
        self.pending
            .as_ref()
            .map(|(_, queued_at)| queued_at.saturating_add(self.delay_ms))
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
