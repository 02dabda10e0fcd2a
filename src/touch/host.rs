use super::{
    event::{Clock, EventSink, GestureEvent, Scheduler, TimerHandle},
    recognizer::Recognizer,
    types::TouchId,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PendingTimer {
    handle: TimerHandle,
    touch: TouchId,
    deadline_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Emitted<T> {
    pub at_ms: u64,
    pub target: T,
    pub event: GestureEvent,
}

/// Deterministic host: a manually advanced clock, an in-memory deadline queue
/// and a sink that records every emitted event.
#[derive(Debug)]
pub struct ManualHost<T> {
    now_ms: u64,
    next_handle: u64,
    timers: Vec<PendingTimer>,
    emitted: Vec<Emitted<T>>,
    tracking: bool,
}

impl<T> Default for ManualHost<T> {
    fn default() -> Self {
        Self::new(0)
    }
}

impl<T> ManualHost<T> {
    pub fn new(now_ms: u64) -> Self {
        Self {
            now_ms,
            next_handle: 1,
            timers: Vec::new(),
            emitted: Vec::new(),
            tracking: false,
        }
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn events(&self) -> &[Emitted<T>] {
        &self.emitted
    }

    pub fn take_events(&mut self) -> Vec<Emitted<T>> {
        std::mem::take(&mut self.emitted)
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.emitted.iter().map(|emitted| emitted.event.name()).collect()
    }

    fn pop_due(&mut self, now_ms: u64) -> Option<PendingTimer> {
        let index = self
            .timers
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.deadline_ms <= now_ms)
            .min_by_key(|(_, timer)| (timer.deadline_ms, timer.handle))
            .map(|(index, _)| index)?;
        Some(self.timers.remove(index))
    }
}

impl<T: Clone> ManualHost<T> {
    /// Moves the clock forward to `now_ms`, firing due press deadlines in
    /// deadline order with the clock set to each deadline.
    pub fn advance_to(&mut self, recognizer: &mut Recognizer<T>, now_ms: u64) {
        while let Some(timer) = self.pop_due(now_ms) {
            self.now_ms = self.now_ms.max(timer.deadline_ms);
            recognizer.press_timer_fired(self, timer.touch, timer.handle);
        }
        self.now_ms = self.now_ms.max(now_ms);
    }
}

impl<T> Clock for ManualHost<T> {
    fn now_ms(&self) -> u64 {
        self.now_ms
    }
}

impl<T> Scheduler for ManualHost<T> {
    fn schedule(&mut self, delay_ms: u64, touch: TouchId) -> TimerHandle {
        let handle = TimerHandle(self.next_handle);
        self.next_handle += 1;
        self.timers.push(PendingTimer {
            handle,
            touch,
            deadline_ms: self.now_ms.saturating_add(delay_ms),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.retain(|timer| timer.handle != handle);
    }
}

impl<T: Clone> EventSink<T> for ManualHost<T> {
    fn emit(&mut self, target: &T, event: GestureEvent) {
        self.emitted.push(Emitted {
            at_ms: self.now_ms,
            target: target.clone(),
            event,
        });
    }

    fn tracking_changed(&mut self, active: bool) {
        self.tracking = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_twice_is_a_no_op() {
        let mut host: ManualHost<&str> = ManualHost::new(0);
        let first = host.schedule(200, 1);
        let second = host.schedule(200, 2);
        assert_ne!(first, second);

        host.cancel(first);
        host.cancel(first);
        assert_eq!(host.pending_timers(), 1);
    }

    #[test]
    fn due_timers_pop_in_deadline_order() {
        let mut host: ManualHost<&str> = ManualHost::new(0);
        let late = host.schedule(300, 1);
        let early = host.schedule(100, 2);

        assert_eq!(host.pop_due(50), None);
        assert_eq!(host.pop_due(400).map(|t| t.handle), Some(early));
        assert_eq!(host.pop_due(400).map(|t| t.handle), Some(late));
        assert_eq!(host.pop_due(400), None);
    }
}
