use super::{
    transform::Transform,
    types::{Offset, TouchList, TouchSample},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    pub sample: TouchSample,
    pub offset: Offset,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEndEvent {
    pub sample: TouchSample,
    pub offset: Offset,
    pub duration_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlickEvent {
    pub sample: TouchSample,
    pub offset: Offset,
    pub duration_ms: u64,
    /// Pixels per millisecond along each axis.
    pub speed_x: f64,
    pub speed_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DualTouchEvent {
    pub transform: Transform,
    pub touches: TouchList,
}

#[derive(Clone, Debug, PartialEq)]
pub enum GestureEvent {
    Press(TouchSample),
    PressEnd(TouchSample),
    Tap(TouchSample),
    DoubleTap(TouchSample),
    PanStart(PanEvent),
    Pan(PanEvent),
    PanEnd(PanEndEvent),
    Flick(FlickEvent),
    DualTouchStart(TouchList),
    DualTouch(DualTouchEvent),
    DualTouchEnd(TouchList),
}

impl GestureEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Press(_) => "press",
            Self::PressEnd(_) => "pressend",
            Self::Tap(_) => "tap",
            Self::DoubleTap(_) => "doubletap",
            Self::PanStart(_) => "panstart",
            Self::Pan(_) => "pan",
            Self::PanEnd(_) => "panend",
            Self::Flick(_) => "flick",
            Self::DualTouchStart(_) => "dualtouchstart",
            Self::DualTouch(_) => "dualtouch",
            Self::DualTouchEnd(_) => "dualtouchend",
        }
    }

    /// The single touch point this event describes, if it is a per-touch event.
    pub fn sample(&self) -> Option<&TouchSample> {
        match self {
            Self::Press(sample)
            | Self::PressEnd(sample)
            | Self::Tap(sample)
            | Self::DoubleTap(sample) => Some(sample),
            Self::PanStart(pan) | Self::Pan(pan) => Some(&pan.sample),
            Self::PanEnd(pan) => Some(&pan.sample),
            Self::Flick(flick) => Some(&flick.sample),
            Self::DualTouchStart(_) | Self::DualTouch(_) | Self::DualTouchEnd(_) => None,
        }
    }

    pub fn touches(&self) -> Option<&TouchList> {
        match self {
            Self::DualTouchStart(touches) | Self::DualTouchEnd(touches) => Some(touches),
            Self::DualTouch(dual) => Some(&dual.touches),
            _ => None,
        }
    }
}

/// Handle of a scheduled press deadline, unique per scheduler.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(pub u64);

pub trait Clock {
    /// Monotonic timestamp in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Deadline scheduling. When a deadline elapses the host calls
/// [`Recognizer::press_timer_fired`](super::Recognizer::press_timer_fired)
/// with the identifier and handle it was scheduled for.
pub trait Scheduler {
    fn schedule(&mut self, delay_ms: u64, touch: super::TouchId) -> TimerHandle;

    /// Must be a no-op for handles that already fired or were cancelled.
    fn cancel(&mut self, handle: TimerHandle);
}

pub trait EventSink<T> {
    fn emit(&mut self, target: &T, event: GestureEvent);

    /// Maps the raw target of the first touch to the element that receives
    /// the whole sequence, e.g. a text node to its parent element.
    fn resolve_target(&mut self, raw: &T) -> T
    where
        T: Clone,
    {
        raw.clone()
    }

    /// Called when move/end listening should start (`true`) or stop.
    fn tracking_changed(&mut self, active: bool) {
        let _ = active;
    }
}

pub trait GestureHost<T>: Clock + Scheduler + EventSink<T> {}

impl<T, H> GestureHost<T> for H where H: Clock + Scheduler + EventSink<T> {}
