// Entry point: precomputes the frames, then opens the player window or
// records headless.
use std::process::ExitCode;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use clap::Parser;
use tracing::*;
use tracing_subscriber::EnvFilter;

use wavefield::app::{self, App};
use wavefield::cli::Args;
use wavefield::config::AppConfig;
use wavefield::sim::pipeline::build_frames;
use wavefield::sim::surface::SurfaceRenderer;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let mut cfg = AppConfig::load_or_default(&args.config);
    args.apply(&mut cfg);
    if let Err(err) = cfg.validate() {
        error!(%err, "invalid configuration");
        return ExitCode::FAILURE;
    }

    let stop_flag = Arc::new(AtomicBool::new(false));
    let stop_flag_for_ctrlc = stop_flag.clone();
    if let Err(err) = ctrlc::set_handler(move || {
        stop_flag_for_ctrlc.store(true, Ordering::SeqCst);
    }) {
        warn!(%err, "could not install Ctrl-C handler");
    }

    let plan = cfg.pipeline();
    let renderer = SurfaceRenderer::new(cfg.render.view, cfg.render.mode, plan.params);
    let frames = build_frames(&plan, &renderer);

    if args.nogui {
        return match app::record_headless(&cfg, frames, &stop_flag) {
            Ok(shown) => {
                info!(shown, dir = %cfg.video.output_dir, "done");
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(%err, "recording failed");
                ExitCode::FAILURE
            }
        };
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size(cfg.window.size),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Wavefield",
        native_options,
        Box::new(move |cc| Ok(Box::new(App::new(cc, &cfg, frames, stop_flag.clone())))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "window closed with error");
            ExitCode::FAILURE
        }
    }
}
