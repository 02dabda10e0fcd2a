mod core;
mod double_tap;
mod host;
mod recognizer;
mod registry;

pub mod config;
pub mod event;
pub mod transform;
pub mod types;

pub use config::{ConfigError, GestureConfig};
pub use self::core::GestureStatus;
pub use double_tap::DoubleTapDetector;
pub use event::{
    Clock, DualTouchEvent, EventSink, FlickEvent, GestureEvent, GestureHost, PanEndEvent,
    PanEvent, Scheduler, TimerHandle,
};
pub use host::{Emitted, ManualHost};
pub use recognizer::Recognizer;
pub use transform::Transform;
pub use types::{Contact, Offset, TouchId, TouchList, TouchPoint, TouchSample, MAX_TOUCH_POINTS};
