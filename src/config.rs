use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::params::SimulationParams;
use crate::sim::initial::InitialCondition;
use crate::sim::pipeline::{PipelinePlan, Scheme};
use crate::sim::surface::{SurfaceMode, View};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub scheme: Scheme,
    #[serde(default = "SimulationConfig::default_width")]
    pub width: usize,
    #[serde(default = "SimulationConfig::default_height")]
    pub height: usize,
    #[serde(default = "SimulationConfig::default_frames")]
    pub frames: usize,
    #[serde(default = "SimulationConfig::default_wave_speed")]
    pub wave_speed: f32,
    #[serde(default = "SimulationConfig::default_dx")]
    pub dx: f32,
    #[serde(default = "SimulationConfig::default_dx")]
    pub dy: f32,
    #[serde(default = "SimulationConfig::default_dt")]
    pub dt: f32,
}

impl SimulationConfig {
    fn default_width() -> usize {
        200
    }
    fn default_height() -> usize {
        200
    }
    fn default_frames() -> usize {
        300
    }
    fn default_wave_speed() -> f32 {
        1.0
    }
    fn default_dx() -> f32 {
        0.01
    }
    fn default_dt() -> f32 {
        0.001
    }

    pub fn params(&self) -> SimulationParams {
        SimulationParams {
            wave_speed: self.wave_speed,
            dx: self.dx,
            dy: self.dy,
            dt: self.dt,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            width: Self::default_width(),
            height: Self::default_height(),
            frames: Self::default_frames(),
            wave_speed: Self::default_wave_speed(),
            dx: Self::default_dx(),
            dy: Self::default_dx(),
            dt: Self::default_dt(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InitialKind {
    #[default]
    Plus,
    Gaussian,
}

/// Flat TOML form of [`InitialCondition`]; only the fields of `kind` matter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialConfig {
    #[serde(default)]
    pub kind: InitialKind,
    #[serde(default = "InitialConfig::default_center")]
    pub center: [f32; 2],
    #[serde(default = "InitialConfig::default_peak")]
    pub peak: f32,
    #[serde(default = "InitialConfig::default_shoulder")]
    pub shoulder: f32,
    #[serde(default = "InitialConfig::default_amplitude")]
    pub amplitude: f32,
    #[serde(default = "InitialConfig::default_sharpness")]
    pub sharpness: f32,
    #[serde(default = "InitialConfig::default_velocity_scale")]
    pub velocity_scale: f32,
}

impl InitialConfig {
    fn default_center() -> [f32; 2] {
        [0.25, 0.25]
    }
    fn default_peak() -> f32 {
        1.0
    }
    fn default_shoulder() -> f32 {
        0.5
    }
    fn default_amplitude() -> f32 {
        10.0
    }
    fn default_sharpness() -> f32 {
        750.0
    }
    fn default_velocity_scale() -> f32 {
        1.0
    }

    pub fn condition(&self) -> InitialCondition {
        match self.kind {
            InitialKind::Plus => InitialCondition::Plus {
                center: self.center,
                peak: self.peak,
                shoulder: self.shoulder,
            },
            InitialKind::Gaussian => InitialCondition::Gaussian {
                amplitude: self.amplitude,
                sharpness: self.sharpness,
                velocity_scale: self.velocity_scale,
            },
        }
    }
}

impl Default for InitialConfig {
    fn default() -> Self {
        Self {
            kind: InitialKind::default(),
            center: Self::default_center(),
            peak: Self::default_peak(),
            shoulder: Self::default_shoulder(),
            amplitude: Self::default_amplitude(),
            sharpness: Self::default_sharpness(),
            velocity_scale: Self::default_velocity_scale(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RenderConfig {
    #[serde(default)]
    pub view: View,
    #[serde(default)]
    pub mode: SurfaceMode,
    #[serde(default)]
    pub tile_neighbors: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoConfig {
    #[serde(default = "VideoConfig::default_output_dir")]
    pub output_dir: String,
    #[serde(default = "VideoConfig::default_size")]
    pub size: [u32; 2],
    #[serde(default = "VideoConfig::default_frame_rate")]
    pub frame_rate: u32,
    #[serde(default = "VideoConfig::default_background")]
    pub background: [f32; 4],
}

impl VideoConfig {
    fn default_output_dir() -> String {
        "wavefield_frames".to_string()
    }
    fn default_size() -> [u32; 2] {
        [1920, 1080]
    }
    fn default_frame_rate() -> u32 {
        30
    }
    fn default_background() -> [f32; 4] {
        [1.0, 1.0, 1.0, 1.0]
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            output_dir: Self::default_output_dir(),
            size: Self::default_size(),
            frame_rate: Self::default_frame_rate(),
            background: Self::default_background(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "WindowConfig::default_size")]
    pub size: [f32; 2],
    #[serde(default = "WindowConfig::default_scrub_margin")]
    pub scrub_margin: f32,
}

impl WindowConfig {
    fn default_size() -> [f32; 2] {
        [1280.0, 720.0]
    }
    fn default_scrub_margin() -> f32 {
        32.0
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: Self::default_size(),
            scrub_margin: Self::default_scrub_margin(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("simulation.{0} must be at least 1")]
    ZeroSize(&'static str),
    #[error("simulation.{name} must be finite and positive, got {value}")]
    NonPositive { name: &'static str, value: f32 },
    #[error("video.frame_rate must be at least 1")]
    ZeroFrameRate,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub initial: InitialConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub window: WindowConfig,
}

impl AppConfig {
    fn round_f32(x: f32) -> f32 {
        (x * 1_000_000.0).round() / 1_000_000.0
    }

    fn format_f32_compact(x: f32) -> String {
        let mut s = format!("{:.6}", x);
        while s.contains('.') && s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
        if s.is_empty() { "0".to_string() } else { s }
    }

    fn rounded(mut self) -> Self {
        let sim = &mut self.simulation;
        sim.wave_speed = Self::round_f32(sim.wave_speed);
        sim.dx = Self::round_f32(sim.dx);
        sim.dy = Self::round_f32(sim.dy);
        sim.dt = Self::round_f32(sim.dt);
        self
    }

    pub fn pipeline(&self) -> PipelinePlan {
        PipelinePlan {
            scheme: self.simulation.scheme,
            width: self.simulation.width,
            height: self.simulation.height,
            frames: self.simulation.frames,
            params: self.simulation.params(),
            initial: self.initial.condition(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let sim = &self.simulation;
        for (name, n) in [("width", sim.width), ("height", sim.height), ("frames", sim.frames)] {
            if n == 0 {
                return Err(ConfigError::ZeroSize(name));
            }
        }
        for (name, value) in [
            ("wave_speed", sim.wave_speed),
            ("dx", sim.dx),
            ("dy", sim.dy),
            ("dt", sim.dt),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.video.frame_rate == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        Ok(())
    }

    /// Comments out every key line of a serialised config, keeping
    /// section headers, so the file documents the defaults.
    fn commented_template(text: &str) -> String {
        let mut commented = String::new();
        for line in text.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                commented.push('\n');
            } else if trimmed.starts_with('[') && trimmed.ends_with(']') && !trimmed.contains('=') {
                commented.push_str(line);
                commented.push('\n');
            } else {
                let mut out_line = line.to_string();
                if let Some((lhs, rhs)) = line.split_once('=') {
                    let rhs_trim = rhs.trim();
                    let has_decimal = rhs_trim.contains('.');
                    if (has_decimal || rhs_trim.contains('e') || rhs_trim.contains('E'))
                        && !rhs_trim.contains('"')
                        && rhs_trim != "true"
                        && rhs_trim != "false"
                    {
                        if let Ok(val) = rhs_trim.parse::<f32>() {
                            let mut formatted = Self::format_f32_compact(val);
                            if has_decimal && !formatted.contains('.') {
                                formatted.push_str(".0");
                            }
                            out_line = format!("{} = {}", lhs.trim(), formatted);
                        }
                    }
                }
                commented.push_str("# ");
                commented.push_str(&out_line);
                commented.push('\n');
            }
        }
        commented
    }

    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => {
                        info!(path, "loaded config");
                        return cfg;
                    }
                    Err(err) => {
                        warn!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    warn!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults and return them.
        let default_cfg = Self::default().rounded();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, Self::commented_template(&text)) {
                    warn!("Failed to write default config to {path}: {err}");
                } else {
                    info!(path, "wrote default config template");
                }
            }
            Err(err) => warn!("Failed to serialize default config: {err}; continuing with defaults"),
        }
        default_cfg
    }
}
