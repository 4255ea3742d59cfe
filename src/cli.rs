use clap::Parser;

use crate::config::AppConfig;
use crate::sim::pipeline::Scheme;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Path to config TOML (a commented template is written if missing)
    #[arg(long, default_value = "wavefield.toml")]
    pub config: String,

    /// Record every frame without opening a window, then exit
    #[arg(long, default_value_t = false)]
    pub nogui: bool,

    /// Directory for recorded frames (overrides config)
    #[arg(long)]
    pub output: Option<String>,

    /// Integration scheme (overrides config)
    #[arg(long, value_enum)]
    pub scheme: Option<Scheme>,

    /// Number of frames to precompute (overrides config)
    #[arg(long)]
    pub frames: Option<usize>,
}

impl Args {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(output) = &self.output {
            cfg.video.output_dir = output.clone();
        }
        if let Some(scheme) = self.scheme {
            cfg.simulation.scheme = scheme;
        }
        if let Some(frames) = self.frames {
            cfg.simulation.frames = frames;
        }
    }
}
