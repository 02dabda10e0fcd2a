use statig::{blocking::IntoStateMachineExt as _, prelude::*};

use super::{
    config::GestureConfig,
    event::{FlickEvent, GestureEvent, PanEndEvent, PanEvent, TimerHandle},
    types::TouchSample,
};


const GESTURE_OUTPUT_CAPACITY: usize = 2;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureStatus {
    Tapping,
    Pressing,
    Panning,
}

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Moved { sample: TouchSample },
    PressDeadline,
    Released { now_ms: u64, sample: TouchSample },
}

#[derive(Clone, Debug, Default)]
pub(crate) struct GestureOutput {
    pub(crate) events: heapless::Vec<GestureEvent, GESTURE_OUTPUT_CAPACITY>,
}

#[derive(Default)]
struct DispatchContext {
    events: heapless::Vec<GestureEvent, GESTURE_OUTPUT_CAPACITY>,
}

impl DispatchContext {
    fn emit(&mut self, event: GestureEvent) {
        if let Err(event) = self.events.push(event) {
            log::warn!("gesture output full, dropping {}", event.name());
        }
    }

    fn finish(self) -> GestureOutput {
        GestureOutput {
            events: self.events,
        }
    }
}

/// Per-touch record: the classification machine plus the live press timer.
pub(crate) struct GestureRecord {
    machine: statig::blocking::StateMachine<GestureHsm>,
    press_timer: Option<TimerHandle>,
}

impl GestureRecord {
    pub(crate) fn new(config: &GestureConfig, start: TouchSample, now_ms: u64) -> Self {
        Self {
            machine: GestureHsm::new(config, start, now_ms).state_machine(),
            press_timer: None,
        }
    }

    pub(crate) fn status(&self) -> GestureStatus {
        self.machine.inner().status
    }

    pub(crate) fn start_sample(&self) -> TouchSample {
        self.machine.inner().start
    }

    #[cfg(test)]
    pub(crate) fn start_ms(&self) -> u64 {
        self.machine.inner().start_ms
    }

    pub(crate) fn arm_press_timer(&mut self, handle: TimerHandle) {
        self.press_timer = Some(handle);
    }

    pub(crate) fn press_timer(&self) -> Option<TimerHandle> {
        self.press_timer
    }

    /// Clears the stored handle; a second call returns `None`.
    pub(crate) fn take_press_timer(&mut self) -> Option<TimerHandle> {
        self.press_timer.take()
    }

    pub(crate) fn advance(&mut self, sample: TouchSample) -> GestureOutput {
        self.dispatch(GestureHsmEvent::Moved { sample })
    }

    pub(crate) fn press_deadline(&mut self) -> GestureOutput {
        self.dispatch(GestureHsmEvent::PressDeadline)
    }

    pub(crate) fn release(&mut self, now_ms: u64, sample: TouchSample) -> GestureOutput {
        self.dispatch(GestureHsmEvent::Released { now_ms, sample })
    }

    fn dispatch(&mut self, event: GestureHsmEvent) -> GestureOutput {
        let mut context = DispatchContext::default();
        self.machine.handle_with_context(&event, &mut context);
        context.finish()
    }
}

struct GestureHsm {
    start: TouchSample,
    start_ms: u64,
    status: GestureStatus,
    move_threshold_px: f64,
    flick_max_ms: u64,
}

impl GestureHsm {
    fn new(config: &GestureConfig, start: TouchSample, now_ms: u64) -> Self {
        Self {
            start,
            start_ms: now_ms,
            status: GestureStatus::Tapping,
            move_threshold_px: config.move_threshold_px,
            flick_max_ms: config.flick_max_ms,
        }
    }

    /// Starts a pan when the touch left the jitter radius around its start.
    fn try_start_pan(&mut self, context: &mut DispatchContext, sample: &TouchSample) -> bool {
        let offset = sample.offset_from(&self.start);
        if offset.length() <= self.move_threshold_px {
            return false;
        }
        self.status = GestureStatus::Panning;
        context.emit(GestureEvent::PanStart(PanEvent {
            sample: *sample,
            offset,
        }));
        true
    }

    fn finish_pan(&self, context: &mut DispatchContext, now_ms: u64, sample: &TouchSample) {
        let offset = sample.offset_from(&self.start);
        let duration_ms = now_ms.saturating_sub(self.start_ms);
        context.emit(GestureEvent::PanEnd(PanEndEvent {
            sample: *sample,
            offset,
            duration_ms,
        }));

        if duration_ms < self.flick_max_ms {
            // Same-millisecond releases still yield a finite speed.
            let elapsed = duration_ms.max(1) as f64;
            context.emit(GestureEvent::Flick(FlickEvent {
                sample: *sample,
                offset,
                duration_ms,
                speed_x: offset.x / elapsed,
                speed_y: offset.y / elapsed,
            }));
        }
    }
}

#[state_machine(initial = "State::tapping()")]
impl GestureHsm {
    #[state]
    fn tapping(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Moved { sample } => {
                if self.try_start_pan(context, sample) {
                    Transition(State::panning())
                } else {
                    Handled
                }
            }
            GestureHsmEvent::PressDeadline => {
                self.status = GestureStatus::Pressing;
                context.emit(GestureEvent::Press(self.start));
                Transition(State::pressing())
            }
            GestureHsmEvent::Released { sample, .. } => {
                context.emit(GestureEvent::Tap(*sample));
                Handled
            }
        }
    }

    #[state]
    fn pressing(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Moved { sample } => {
                // Any move cancels the press classification.
                self.status = GestureStatus::Tapping;
                if self.try_start_pan(context, sample) {
                    Transition(State::panning())
                } else {
                    Transition(State::tapping())
                }
            }
            GestureHsmEvent::PressDeadline => Handled,
            GestureHsmEvent::Released { sample, .. } => {
                context.emit(GestureEvent::PressEnd(*sample));
                Handled
            }
        }
    }

    #[state]
    fn panning(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Moved { sample } => {
                context.emit(GestureEvent::Pan(PanEvent {
                    sample: *sample,
                    offset: sample.offset_from(&self.start),
                }));
                Handled
            }
            GestureHsmEvent::PressDeadline => Handled,
            GestureHsmEvent::Released { now_ms, sample } => {
                self.finish_pan(context, *now_ms, sample);
                Handled
            }
        }
    }
}
