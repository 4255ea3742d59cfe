use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, unbounded};
use egui::{Event, Key, PointerButton, Pos2, Rect, Sense, ViewportCommand};
use tracing::*;

use crate::config::AppConfig;
use crate::sim::pipeline::FrameBuffer;
use crate::sim::surface::SurfaceFrame;
use crate::timeline::{FrameDisplay, Flow, SystemClock, Timeline, TimelineEvent};
use crate::ui::scrub_bar;
use crate::ui::viewport::SurfaceView;
use crate::video::writer::PngSequenceFactory;
use crate::video::SinkError;

pub fn sink_factory(cfg: &AppConfig) -> PngSequenceFactory {
    PngSequenceFactory {
        dir: PathBuf::from(&cfg.video.output_dir),
        size: cfg.video.size,
        background: cfg.video.background,
    }
}

pub struct App {
    timeline: Timeline<SurfaceFrame, SurfaceView, PngSequenceFactory>,
    events_tx: Sender<TimelineEvent>,
    events_rx: Receiver<TimelineEvent>,
    viewport: Rect,
    frame_interval: Duration,
    exiting: Arc<AtomicBool>,
}

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        cfg: &AppConfig,
        frames: FrameBuffer<SurfaceFrame>,
        stop_flag: Arc<AtomicBool>,
    ) -> Self {
        let (events_tx, events_rx) = unbounded();
        let view = SurfaceView::new(cfg.window.size, cfg.render.tile_neighbors);
        let timeline = Timeline::new(
            frames,
            view,
            sink_factory(cfg),
            SystemClock,
            cfg.window.scrub_margin,
        );

        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        Self {
            timeline,
            events_tx,
            events_rx,
            viewport: Rect::from_min_size(Pos2::ZERO, cfg.window.size.into()),
            frame_interval: Duration::from_secs_f32(1.0 / cfg.video.frame_rate as f32),
            exiting: stop_flag,
        }
    }

    /// Turns raw egui input into timeline events, with pointer positions
    /// relative to the drawing area.
    fn collect_input(&self, ctx: &egui::Context) {
        let origin = self.viewport.min;
        ctx.input(|input| {
            for event in &input.events {
                let translated = match event {
                    Event::Key {
                        key,
                        pressed: true,
                        repeat: false,
                        ..
                    } => match key {
                        Key::R => Some(TimelineEvent::ToggleRecord),
                        Key::Q => Some(TimelineEvent::Quit),
                        _ => None,
                    },
                    Event::PointerMoved(pos) => Some(TimelineEvent::PointerMove {
                        x: pos.x - origin.x,
                        y: pos.y - origin.y,
                    }),
                    Event::PointerButton {
                        pos,
                        button: PointerButton::Primary,
                        pressed,
                        ..
                    } => Some(if *pressed {
                        TimelineEvent::PointerPress {
                            x: pos.x - origin.x,
                            y: pos.y - origin.y,
                        }
                    } else {
                        TimelineEvent::PointerRelease
                    }),
                    _ => None,
                };
                if let Some(ev) = translated {
                    let _ = self.events_tx.send(ev);
                }
            }
        });
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.exiting.load(Ordering::SeqCst) {
            info!("SIGINT received: closing window.");
            let _ = self.events_tx.send(TimelineEvent::Quit);
        }

        self.collect_input(ctx);
        if self.timeline.drain(&self.events_rx) == Flow::Quit {
            self.timeline.stop_recording();
            ctx.send_viewport_cmd(ViewportCommand::Close);
            return;
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let (rect, _) = ui.allocate_exact_size(ui.available_size(), Sense::hover());
                self.viewport = rect;
                self.timeline.display_mut().set_size(rect.size());
                self.timeline.tick();

                let painter = ui.painter_at(rect);
                self.timeline.display().paint(&painter, rect);
                scrub_bar::draw(
                    &painter,
                    rect,
                    self.timeline.scrub_margin(),
                    self.timeline.position(),
                    self.timeline.is_recording(),
                    self.timeline.progress().as_ref(),
                );
            });

        ctx.request_repaint_after(self.frame_interval);
    }
}

impl Drop for App {
    fn drop(&mut self) {
        info!("App drop. Finalizing..");
        self.timeline.stop_recording();
    }
}

/// Stand-in display for runs without a window.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    size: [f32; 2],
    shown: usize,
}

impl HeadlessDisplay {
    pub fn new(size: [f32; 2]) -> Self {
        Self { size, shown: 0 }
    }

    pub fn shown(&self) -> usize {
        self.shown
    }
}

impl<F> FrameDisplay<F> for HeadlessDisplay {
    fn size(&self) -> [f32; 2] {
        self.size
    }

    fn show(&mut self, _index: usize, _frame: &F) {
        self.shown += 1;
    }
}

/// Records every frame once and returns how many were shown. Stops early
/// when `stop_flag` is raised.
pub fn record_headless(
    cfg: &AppConfig,
    frames: FrameBuffer<SurfaceFrame>,
    stop_flag: &AtomicBool,
) -> Result<usize, SinkError> {
    let display = HeadlessDisplay::new(cfg.window.size);
    let mut timeline = Timeline::new(
        frames,
        display,
        sink_factory(cfg),
        SystemClock,
        cfg.window.scrub_margin,
    );
    timeline.start_recording()?;
    while timeline.is_recording() {
        if stop_flag.load(Ordering::SeqCst) {
            warn!(frame = timeline.frame_index(), "interrupted; finalizing output");
            timeline.stop_recording();
            break;
        }
        timeline.tick();
    }
    Ok(timeline.display().shown())
}
