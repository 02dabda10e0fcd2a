use super::{
    config::{ConfigError, GestureConfig},
    core::{GestureOutput, GestureRecord, GestureStatus},
    double_tap::DoubleTapDetector,
    event::{DualTouchEvent, EventSink, GestureEvent, GestureHost, TimerHandle},
    registry::TouchRegistry,
    transform,
    types::{find_sample, touch_list, Contact, TouchId, TouchList},
};


/// Turns batched raw contact events into semantic gesture events.
///
/// Every entry point receives the host's current touch list (`touches`) and
/// the touches that changed in the raw event (`changed`). All state lives in
/// the recognizer value, so independent surfaces use independent recognizers.
pub struct Recognizer<T> {
    config: GestureConfig,
    registry: TouchRegistry,
    target: Option<T>,
    double_tap: DoubleTapDetector,
}

impl<T: Clone> Default for Recognizer<T> {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<T: Clone> Recognizer<T> {
    /// Takes `config` as is. Callers holding an unchecked profile should run
    /// [`GestureConfig::validate`] first or use [`Recognizer::try_new`]; a
    /// NaN move threshold classifies every move as a pan.
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            registry: TouchRegistry::new(),
            target: None,
            double_tap: DoubleTapDetector::new(config.double_tap_window_ms),
        }
    }

    pub fn try_new(config: GestureConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Element receiving the events of the current gesture sequence.
    pub fn target(&self) -> Option<&T> {
        self.target.as_ref()
    }

    pub fn is_tracking(&self) -> bool {
        !self.registry.is_empty()
    }

    pub fn active_touches(&self) -> Vec<TouchId> {
        self.registry.ids().collect()
    }

    pub fn status(&self, id: TouchId) -> Option<GestureStatus> {
        self.registry.get(id).map(GestureRecord::status)
    }

    pub fn contact_start<H: GestureHost<T>>(
        &mut self,
        host: &mut H,
        touches: &[Contact<T>],
        changed: &[Contact<T>],
    ) {
        let now_ms = host.now_ms();
        let fresh: Vec<&Contact<T>> = changed
            .iter()
            .filter(|contact| !self.registry.contains(contact.identifier()))
            .collect();
        let Some(first_fresh) = fresh.first().copied() else {
            return;
        };

        if self.registry.is_empty() {
            let origin = touches.first().unwrap_or(first_fresh);
            let target = host.resolve_target(&origin.target);
            self.target = Some(target);
            host.tracking_changed(true);
            log::debug!("gesture sequence started at {now_ms} ms");
        }

        let before = self.registry.len();
        for contact in fresh {
            let id = contact.identifier();
            if self.registry.contains(id) {
                continue;
            }
            let mut record = GestureRecord::new(&self.config, contact.sample, now_ms);
            record.arm_press_timer(host.schedule(self.config.press_delay_ms, id));
            self.registry.insert(id, record);
        }

        if before != 2 && self.registry.len() == 2 {
            log::debug!("dual touch started");
            self.emit(host, GestureEvent::DualTouchStart(touch_list(touches)));
        }
    }

    pub fn contact_move<H: GestureHost<T>>(
        &mut self,
        host: &mut H,
        touches: &[Contact<T>],
        changed: &[Contact<T>],
    ) {
        let mut moved_registered = false;
        for contact in changed {
            let Some(record) = self.registry.get_mut(contact.identifier()) else {
                continue;
            };
            moved_registered = true;
            let output = record.advance(contact.sample);
            if record.status() == GestureStatus::Panning {
                if let Some(handle) = record.take_press_timer() {
                    host.cancel(handle);
                }
            }
            self.emit_output(host, output);
        }

        if moved_registered {
            self.update_dual_touch(host, touches, changed);
        }
    }

    pub fn contact_end<H: GestureHost<T>>(
        &mut self,
        host: &mut H,
        touches: &[Contact<T>],
        changed: &[Contact<T>],
    ) {
        let now_ms = host.now_ms();
        for contact in changed {
            let id = contact.identifier();
            if !self.registry.contains(id) {
                continue;
            }
            self.leave_dual_touch(host, touches);

            let Some(record) = self.registry.get_mut(id) else {
                continue;
            };
            if let Some(handle) = record.take_press_timer() {
                host.cancel(handle);
            }
            let output = record.release(now_ms, contact.sample);
            self.emit_output(host, output);
            self.registry.remove(id);
        }

        if self.registry.is_empty() {
            self.end_sequence(host);
        }
    }

    /// Platform cancellation: records are dropped without terminal
    /// tap/pan/press events.
    pub fn contact_cancel<H: GestureHost<T>>(
        &mut self,
        host: &mut H,
        touches: &[Contact<T>],
        changed: &[Contact<T>],
    ) {
        for contact in changed {
            let id = contact.identifier();
            if !self.registry.contains(id) {
                continue;
            }
            self.leave_dual_touch(host, touches);
            if let Some(mut record) = self.registry.remove(id) {
                if let Some(handle) = record.take_press_timer() {
                    host.cancel(handle);
                }
            }
            log::debug!("touch {id} cancelled");
        }

        if self.registry.is_empty() {
            self.end_sequence(host);
        }
    }

    /// Press deadline callback. Stale handles and unknown touches are ignored.
    pub fn press_timer_fired<H: GestureHost<T>>(
        &mut self,
        host: &mut H,
        touch: TouchId,
        handle: TimerHandle,
    ) {
        let Some(record) = self.registry.get_mut(touch) else {
            return;
        };
        if record.press_timer() != Some(handle) {
            log::trace!("ignoring stale press timer {handle:?} for touch {touch}");
            return;
        }
        record.take_press_timer();
        let output = record.press_deadline();
        self.emit_output(host, output);
    }

    /// Drops every active touch and forgets the last tap. A live dual touch is
    /// closed with `dualtouchend` carrying the start samples.
    pub fn reset<H: GestureHost<T>>(&mut self, host: &mut H) {
        if let Some(pair) = self.registry.pair() {
            let mut touches = TouchList::new();
            for (_, record) in pair {
                // Capacity is far above two.
                let _ = touches.push(record.start_sample());
            }
            log::debug!("dual touch ended by reset");
            self.emit(host, GestureEvent::DualTouchEnd(touches));
        }
        for (_, mut record) in self.registry.drain() {
            if let Some(handle) = record.take_press_timer() {
                host.cancel(handle);
            }
        }
        self.end_sequence(host);
        self.double_tap.clear();
    }

    fn update_dual_touch<H: GestureHost<T>>(
        &mut self,
        host: &mut H,
        touches: &[Contact<T>],
        changed: &[Contact<T>],
    ) {
        let Some([(id_a, a), (id_b, b)]) = self.registry.pair() else {
            return;
        };
        let current = |id: TouchId| find_sample(touches, id).or_else(|| find_sample(changed, id));
        let (Some(now_a), Some(now_b)) = (current(id_a), current(id_b)) else {
            return;
        };

        let estimated = transform::estimate(
            a.start_sample().client,
            b.start_sample().client,
            now_a.client,
            now_b.client,
        );
        match estimated {
            Some(transform) => self.emit(
                host,
                GestureEvent::DualTouch(DualTouchEvent {
                    transform,
                    touches: touch_list(touches),
                }),
            ),
            None => log::debug!("dual touch {id_a}/{id_b} has no baseline, skipping"),
        }
    }

    fn leave_dual_touch<H: GestureHost<T>>(&mut self, host: &mut H, touches: &[Contact<T>]) {
        if self.registry.len() == 2 {
            log::debug!("dual touch ended");
            self.emit(host, GestureEvent::DualTouchEnd(touch_list(touches)));
        }
    }

    fn end_sequence<H: EventSink<T>>(&mut self, host: &mut H) {
        if self.target.take().is_some() {
            host.tracking_changed(false);
            log::debug!("gesture sequence ended");
        }
    }

    fn emit_output<H: GestureHost<T>>(&mut self, host: &mut H, output: GestureOutput) {
        for event in output.events {
            let tap = match &event {
                GestureEvent::Tap(sample) => Some(*sample),
                _ => None,
            };
            self.emit(host, event);
            if let Some(sample) = tap {
                if self.double_tap.register_tap(host.now_ms()) {
                    self.emit(host, GestureEvent::DoubleTap(sample));
                }
            }
        }
    }

    fn emit<H: EventSink<T>>(&self, host: &mut H, event: GestureEvent) {
        let Some(target) = self.target.as_ref() else {
            log::warn!("no bound target, dropping {}", event.name());
            return;
        };
        log::trace!("emit {}", event.name());
        host.emit(target, event);
    }
}
