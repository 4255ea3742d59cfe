//! Playback position, scrubbing and the recording lifecycle, driven by a
//! single-threaded loop: drain queued events, then tick once.

pub mod controller;
pub mod events;
pub mod progress;

pub use controller::{Clock, FrameDisplay, Mode, SystemClock, Timeline};
pub use events::{Flow, TimelineEvent};
pub use progress::Progress;
