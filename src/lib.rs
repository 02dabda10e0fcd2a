//! Touch gesture recognition: tap, double tap, press, pan, flick and
//! two-finger dual touch from batched raw contact events.

pub mod touch;

pub use touch::{
    Contact, GestureConfig, GestureEvent, GestureHost, GestureStatus, ManualHost, Recognizer,
    TouchId, TouchSample,
};
