use std::path::PathBuf;
use std::sync::atomic::AtomicBool;

use wavefield::app::record_headless;
use wavefield::config::AppConfig;
use wavefield::sim::pipeline::{Scheme, build_frames};
use wavefield::sim::surface::{SurfaceMode, SurfaceRenderer, View};

fn unique_dir(name: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "wavefield_headless_{}_{}",
        name,
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    path
}

fn small_config(dir: &PathBuf) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.simulation.width = 12;
    cfg.simulation.height = 10;
    cfg.simulation.frames = 4;
    cfg.video.size = [24, 20];
    cfg.video.output_dir = dir.to_string_lossy().to_string();
    cfg
}

#[test]
fn writes_one_png_per_frame() {
    let dir = unique_dir("pngs");
    let mut cfg = small_config(&dir);
    cfg.simulation.scheme = Scheme::RungeKutta;
    cfg.render.view = View::Energy;
    cfg.render.mode = SurfaceMode::Smooth;
    cfg.validate().unwrap();

    let plan = cfg.pipeline();
    let renderer = SurfaceRenderer::new(cfg.render.view, cfg.render.mode, plan.params);
    let frames = build_frames(&plan, &renderer);

    let shown = record_headless(&cfg, frames, &AtomicBool::new(false)).unwrap();
    assert_eq!(shown, 4);
    for i in 0..4 {
        let path = dir.join(format!("frame_{i:05}.png"));
        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (24, 20));
    }
    assert!(!dir.join("frame_00004.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn raised_stop_flag_writes_nothing() {
    let dir = unique_dir("stopped");
    let cfg = small_config(&dir);
    let plan = cfg.pipeline();
    let renderer = SurfaceRenderer::new(cfg.render.view, cfg.render.mode, plan.params);
    let frames = build_frames(&plan, &renderer);

    let shown = record_headless(&cfg, frames, &AtomicBool::new(true)).unwrap();
    assert_eq!(shown, 0);
    assert!(!dir.join("frame_00000.png").exists());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn unusable_output_dir_is_an_error() {
    let file = unique_dir("blocker");
    std::fs::write(&file, b"not a directory").unwrap();
    let cfg = small_config(&file.join("frames"));
    let plan = cfg.pipeline();
    let renderer = SurfaceRenderer::new(cfg.render.view, cfg.render.mode, plan.params);
    let frames = build_frames(&plan, &renderer);

    assert!(record_headless(&cfg, frames, &AtomicBool::new(false)).is_err());

    let _ = std::fs::remove_file(&file);
}
