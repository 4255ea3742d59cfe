use std::cell::{Cell, RefCell};
use std::io;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossbeam_channel::unbounded;
use wavefield::sim::pipeline::FrameBuffer;
use wavefield::timeline::{Clock, Flow, FrameDisplay, Mode, Timeline, TimelineEvent};
use wavefield::video::{FrameSink, SinkError, SinkFactory};

#[derive(Default)]
struct SinkLog {
    opened: usize,
    written: Vec<usize>,
    finished: usize,
}

struct MemorySink {
    log: Rc<RefCell<SinkLog>>,
    fail_at: Option<usize>,
}

fn io_error(msg: &str) -> SinkError {
    SinkError::CreateDir {
        path: "memory".into(),
        source: io::Error::other(msg.to_string()),
    }
}

impl FrameSink<usize> for MemorySink {
    fn write_frame(&mut self, frame: &usize) -> Result<(), SinkError> {
        if self.fail_at == Some(*frame) {
            return Err(io_error("disk full"));
        }
        self.log.borrow_mut().written.push(*frame);
        Ok(())
    }

    fn finish(self) -> Result<usize, SinkError> {
        let mut log = self.log.borrow_mut();
        log.finished += 1;
        Ok(log.written.len())
    }
}

#[derive(Clone, Default)]
struct MemorySinks {
    log: Rc<RefCell<SinkLog>>,
    refuse_open: bool,
    fail_at: Option<usize>,
}

impl SinkFactory<usize> for MemorySinks {
    type Sink = MemorySink;

    fn open(&mut self) -> Result<MemorySink, SinkError> {
        if self.refuse_open {
            return Err(io_error("read-only"));
        }
        self.log.borrow_mut().opened += 1;
        Ok(MemorySink {
            log: self.log.clone(),
            fail_at: self.fail_at,
        })
    }
}

#[derive(Default)]
struct FakeDisplay {
    shown: Vec<usize>,
}

impl FrameDisplay<usize> for FakeDisplay {
    fn size(&self) -> [f32; 2] {
        [1032.0, 600.0]
    }

    fn show(&mut self, index: usize, frame: &usize) {
        assert_eq!(index, *frame);
        self.shown.push(index);
    }
}

#[derive(Clone)]
struct ManualClock(Rc<Cell<Instant>>);

impl ManualClock {
    fn new() -> Self {
        Self(Rc::new(Cell::new(Instant::now())))
    }

    fn advance(&self, d: Duration) {
        self.0.set(self.0.get() + d);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.0.get()
    }
}

const MARGIN: f32 = 32.0;

fn timeline(
    n: usize,
    sinks: MemorySinks,
) -> (Timeline<usize, FakeDisplay, MemorySinks, ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let frames = FrameBuffer::from_frames((0..n).collect());
    let tl = Timeline::new(frames, FakeDisplay::default(), sinks, clock.clone(), MARGIN);
    (tl, clock)
}

#[test]
fn recording_writes_every_frame_then_goes_idle() {
    let sinks = MemorySinks::default();
    let log = sinks.log.clone();
    let (mut tl, _) = timeline(5, sinks);

    tl.handle(TimelineEvent::PointerPress { x: 1000.0, y: 590.0 });
    tl.handle(TimelineEvent::PointerRelease);
    assert_eq!(tl.frame_index(), 4);

    tl.handle(TimelineEvent::ToggleRecord);
    assert_eq!(tl.mode(), Mode::Recording);
    assert_eq!(tl.frame_index(), 0);

    let mut ticks = 0;
    while tl.is_recording() {
        tl.tick();
        ticks += 1;
        assert!(ticks <= 5, "recording did not stop");
    }

    assert_eq!(ticks, 5);
    assert_eq!(tl.mode(), Mode::Idle);
    assert_eq!(tl.frame_index(), 4);
    let log = log.borrow();
    assert_eq!(log.opened, 1);
    assert_eq!(log.written, vec![0, 1, 2, 3, 4]);
    assert_eq!(log.finished, 1);
    assert_eq!(tl.display().shown, vec![0, 1, 2, 3, 4]);
}

#[test]
fn idle_ticks_keep_the_frame() {
    let (mut tl, _) = timeline(3, MemorySinks::default());
    for _ in 0..4 {
        tl.tick();
    }
    assert_eq!(tl.frame_index(), 0);
    assert_eq!(tl.display().shown, vec![0, 0, 0, 0]);
}

#[test]
fn second_toggle_stops_and_keeps_position() {
    let sinks = MemorySinks::default();
    let log = sinks.log.clone();
    let (mut tl, _) = timeline(10, sinks);

    tl.toggle_record();
    tl.tick();
    tl.tick();
    tl.tick();
    tl.toggle_record();

    assert_eq!(tl.mode(), Mode::Idle);
    assert_eq!(tl.frame_index(), 3);
    assert_eq!(log.borrow().written, vec![0, 1, 2]);
    assert_eq!(log.borrow().finished, 1);
    assert!(tl.progress().is_none());
}

#[test]
fn refused_sink_stays_idle() {
    let sinks = MemorySinks {
        refuse_open: true,
        ..Default::default()
    };
    let (mut tl, _) = timeline(4, sinks);
    tl.handle(TimelineEvent::PointerPress { x: 1000.0, y: 590.0 });
    tl.handle(TimelineEvent::PointerRelease);

    tl.toggle_record();
    assert_eq!(tl.mode(), Mode::Idle);
    assert_eq!(tl.frame_index(), 3);
    assert!(tl.start_recording().is_err());
}

#[test]
fn write_failure_finalizes_and_stops() {
    let sinks = MemorySinks {
        fail_at: Some(2),
        ..Default::default()
    };
    let log = sinks.log.clone();
    let (mut tl, _) = timeline(6, sinks);

    tl.toggle_record();
    for _ in 0..3 {
        tl.tick();
    }
    assert_eq!(tl.mode(), Mode::Idle);
    assert_eq!(tl.frame_index(), 2);
    assert_eq!(log.borrow().written, vec![0, 1]);
    assert_eq!(log.borrow().finished, 1);
}

#[test]
fn scrub_follows_pointer_until_release() {
    let (mut tl, _) = timeline(11, MemorySinks::default());

    tl.handle(TimelineEvent::PointerPress { x: 516.0, y: 590.0 });
    assert!(tl.is_scrubbing());
    assert_eq!(tl.frame_index(), 5);

    tl.handle(TimelineEvent::PointerMove { x: 85.0, y: 300.0 });
    assert_eq!(tl.frame_index(), 1);
    tl.handle(TimelineEvent::PointerMove { x: -40.0, y: 300.0 });
    assert_eq!(tl.frame_index(), 0);
    tl.handle(TimelineEvent::PointerMove { x: 4000.0, y: 300.0 });
    assert_eq!(tl.frame_index(), 10);

    tl.handle(TimelineEvent::PointerRelease);
    assert!(!tl.is_scrubbing());
    tl.handle(TimelineEvent::PointerMove { x: 516.0, y: 590.0 });
    assert_eq!(tl.frame_index(), 10);
}

#[test]
fn press_above_strip_does_not_scrub() {
    let (mut tl, _) = timeline(11, MemorySinks::default());
    tl.handle(TimelineEvent::PointerPress { x: 516.0, y: 100.0 });
    assert!(!tl.is_scrubbing());
    tl.handle(TimelineEvent::PointerMove { x: 1000.0, y: 100.0 });
    assert_eq!(tl.frame_index(), 0);
}

#[test]
fn press_while_recording_is_ignored() {
    let (mut tl, _) = timeline(11, MemorySinks::default());
    tl.toggle_record();
    tl.tick();
    tl.handle(TimelineEvent::PointerPress { x: 1000.0, y: 590.0 });
    assert!(!tl.is_scrubbing());
    assert_eq!(tl.frame_index(), 1);
}

#[test]
fn toggle_during_drag_cancels_scrub() {
    let (mut tl, _) = timeline(11, MemorySinks::default());
    tl.handle(TimelineEvent::PointerPress { x: 516.0, y: 590.0 });
    tl.toggle_record();
    assert!(!tl.is_scrubbing());
    tl.handle(TimelineEvent::PointerMove { x: 1000.0, y: 590.0 });
    assert_eq!(tl.frame_index(), 0);
}

#[test]
fn progress_estimates_from_elapsed_time() {
    let (mut tl, clock) = timeline(5, MemorySinks::default());
    tl.toggle_record();
    clock.advance(Duration::from_secs(30));
    tl.tick();

    let p = tl.progress().expect("progress while recording");
    assert_eq!(p.fraction, 0.25);
    assert_eq!(p.elapsed, Duration::from_secs(30));
    assert_eq!(p.estimated_total, Duration::from_secs(120));
    assert_eq!(p.remaining, Duration::from_secs(90));
}

#[test]
fn single_frame_records_once() {
    let sinks = MemorySinks::default();
    let log = sinks.log.clone();
    let (mut tl, _) = timeline(1, sinks);
    assert_eq!(tl.position(), 0.0);

    tl.toggle_record();
    tl.tick();
    assert_eq!(tl.mode(), Mode::Idle);
    assert_eq!(log.borrow().written, vec![0]);
    assert_eq!(tl.frame_index(), 0);
}

#[test]
fn drain_stops_at_quit() {
    let (mut tl, _) = timeline(11, MemorySinks::default());
    let (tx, rx) = unbounded();
    tx.send(TimelineEvent::PointerPress { x: 516.0, y: 590.0 }).unwrap();
    tx.send(TimelineEvent::Quit).unwrap();
    tx.send(TimelineEvent::PointerMove { x: 1000.0, y: 590.0 }).unwrap();

    assert_eq!(tl.drain(&rx), Flow::Quit);
    assert_eq!(tl.frame_index(), 5);
    assert_eq!(rx.len(), 1);
}

#[test]
fn drop_finalizes_active_recording_once() {
    let sinks = MemorySinks::default();
    let log = sinks.log.clone();
    {
        let (mut tl, _) = timeline(8, sinks);
        tl.toggle_record();
        tl.tick();
        tl.tick();
    }
    assert_eq!(log.borrow().written, vec![0, 1]);
    assert_eq!(log.borrow().finished, 1);
}
