//! Playback/recording state machine.
//!
//! Idle: the frame index only changes through scrubbing.
//! Recording: every tick writes the current frame to the sink and moves one
//! frame forward; pointer presses are ignored. Reaching the last frame or a
//! second toggle finalises the sink and returns to Idle.

use std::time::Instant;

use crossbeam_channel::Receiver;
use tracing::{info, warn};

use crate::sim::pipeline::FrameBuffer;
use crate::timeline::events::{frame_from_pointer, in_scrub_strip, Flow, TimelineEvent};
use crate::timeline::progress::Progress;
use crate::video::{FrameSink, SinkError, SinkFactory};

/// Interactive surface the current frame is shown on.
pub trait FrameDisplay<F> {
    /// Current size in pixels, used for the scrub strip.
    fn size(&self) -> [f32; 2];

    fn show(&mut self, index: usize, frame: &F);
}

pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Recording,
}

struct Recording<S> {
    sink: S,
    started: Instant,
}

pub struct Timeline<F, D, K, C = SystemClock>
where
    K: SinkFactory<F>,
{
    frames: FrameBuffer<F>,
    display: D,
    sinks: K,
    clock: C,
    frame: usize,
    recording: Option<Recording<K::Sink>>,
    scrub_drag: bool,
    pointer: [f32; 2],
    scrub_margin: f32,
    progress: Option<Progress>,
}

impl<F, D, K, C> Timeline<F, D, K, C>
where
    D: FrameDisplay<F>,
    K: SinkFactory<F>,
    C: Clock,
{
    /// `frames` must hold at least one frame.
    pub fn new(frames: FrameBuffer<F>, display: D, sinks: K, clock: C, scrub_margin: f32) -> Self {
        assert!(!frames.is_empty(), "timeline needs at least one frame");
        Self {
            frames,
            display,
            sinks,
            clock,
            frame: 0,
            recording: None,
            scrub_drag: false,
            pointer: [0.0, 0.0],
            scrub_margin,
            progress: None,
        }
    }

    pub fn frame_index(&self) -> usize {
        self.frame
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn mode(&self) -> Mode {
        if self.recording.is_some() {
            Mode::Recording
        } else {
            Mode::Idle
        }
    }

    pub fn is_recording(&self) -> bool {
        self.recording.is_some()
    }

    pub fn is_scrubbing(&self) -> bool {
        self.scrub_drag
    }

    /// `frame / (N - 1)`, or 0 for a single frame.
    pub fn position(&self) -> f32 {
        let n = self.frames.len();
        if n > 1 {
            self.frame as f32 / (n - 1) as f32
        } else {
            0.0
        }
    }

    /// Last progress readout of the active recording.
    pub fn progress(&self) -> Option<Progress> {
        self.progress
    }

    pub fn scrub_margin(&self) -> f32 {
        self.scrub_margin
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    pub fn handle(&mut self, event: TimelineEvent) -> Flow {
        match event {
            TimelineEvent::ToggleRecord => self.toggle_record(),
            TimelineEvent::PointerPress { x, y } => {
                self.pointer = [x, y];
                let [_, height] = self.display.size();
                if !self.is_recording() && in_scrub_strip(y, height, self.scrub_margin) {
                    self.scrub_drag = true;
                    self.scrub_to_pointer();
                }
            }
            TimelineEvent::PointerMove { x, y } => {
                self.pointer = [x, y];
                if self.scrub_drag {
                    self.scrub_to_pointer();
                }
            }
            TimelineEvent::PointerRelease => self.scrub_drag = false,
            TimelineEvent::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// Handles every queued event; stops early on quit.
    pub fn drain(&mut self, events: &Receiver<TimelineEvent>) -> Flow {
        while let Ok(event) = events.try_recv() {
            if self.handle(event) == Flow::Quit {
                return Flow::Quit;
            }
        }
        Flow::Continue
    }

    pub fn toggle_record(&mut self) {
        if self.recording.is_some() {
            self.stop_recording();
        } else if let Err(err) = self.start_recording() {
            warn!(%err, "could not open output sink; staying idle");
        }
    }

    /// Opens a sink and rewinds to frame 0. On failure nothing changes.
    pub fn start_recording(&mut self) -> Result<(), SinkError> {
        if self.recording.is_some() {
            return Ok(());
        }
        let sink = self.sinks.open()?;
        self.frame = 0;
        self.scrub_drag = false;
        self.progress = None;
        self.recording = Some(Recording {
            sink,
            started: self.clock.now(),
        });
        info!(frames = self.frames.len(), "recording");
        Ok(())
    }

    /// One loop iteration: show the current frame, and while recording also
    /// write it and advance.
    pub fn tick(&mut self) {
        let index = self.frame;
        let frame = &self.frames[index];
        self.display.show(index, frame);

        let Some(rec) = self.recording.as_mut() else {
            return;
        };
        if let Err(err) = rec.sink.write_frame(frame) {
            warn!(%err, frame = index, "sink write failed; stopping recording");
            self.stop_recording();
            return;
        }
        let started = rec.started;

        if index + 1 >= self.frames.len() {
            self.stop_recording();
            return;
        }

        self.frame += 1;
        let progress = Progress::estimate(self.position(), self.clock.now() - started);
        info!(frame = self.frame, "{progress}");
        self.progress = Some(progress);
    }

    /// Finalises an active recording, if any. The frame index is kept.
    pub fn stop_recording(&mut self) {
        let Some(rec) = self.recording.take() else {
            return;
        };
        self.progress = None;
        match rec.sink.finish() {
            Ok(written) => info!(written, frame = self.frame, "recording stopped"),
            Err(err) => warn!(%err, "failed to finalize output sink"),
        }
    }

    fn scrub_to_pointer(&mut self) {
        let [width, _] = self.display.size();
        self.frame = frame_from_pointer(self.pointer[0], width, self.scrub_margin, self.frames.len());
    }
}

impl<F, D, K, C> Drop for Timeline<F, D, K, C>
where
    K: SinkFactory<F>,
{
    fn drop(&mut self) {
        if let Some(rec) = self.recording.take() {
            if let Err(err) = rec.sink.finish() {
                warn!(%err, "failed to finalize output sink on shutdown");
            }
        }
    }
}
