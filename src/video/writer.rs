use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::core::colormap::Rgba;
use crate::sim::surface::SurfaceFrame;
use crate::video::raster::rasterize;
use crate::video::{FrameSink, SinkError, SinkFactory};

/// Writes each frame as `frame_NNNNN.png` into one directory.
pub struct PngSequence {
    dir: PathBuf,
    size: [u32; 2],
    background: Rgba,
    written: usize,
}

impl PngSequence {
    pub fn create(dir: impl AsRef<Path>, size: [u32; 2], background: Rgba) -> Result<Self, SinkError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDir {
            path: dir.display().to_string(),
            source,
        })?;
        info!(dir = %dir.display(), width = size[0], height = size[1], "recording started");
        Ok(Self {
            dir,
            size,
            background,
            written: 0,
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink<SurfaceFrame> for PngSequence {
    fn write_frame(&mut self, frame: &SurfaceFrame) -> Result<(), SinkError> {
        let path = self.frame_path(self.written);
        rasterize(frame, self.size, self.background)
            .save(&path)
            .map_err(|source| SinkError::Encode {
                path: path.display().to_string(),
                source,
            })?;
        debug!(path = %path.display(), "frame written");
        self.written += 1;
        Ok(())
    }

    fn finish(self) -> Result<usize, SinkError> {
        info!(dir = %self.dir.display(), frames = self.written, "recording finalized");
        Ok(self.written)
    }
}

/// Opens a [`PngSequence`] in a fixed directory for every session.
#[derive(Clone, Debug)]
pub struct PngSequenceFactory {
    pub dir: PathBuf,
    pub size: [u32; 2],
    pub background: Rgba,
}

impl SinkFactory<SurfaceFrame> for PngSequenceFactory {
    type Sink = PngSequence;

    fn open(&mut self) -> Result<PngSequence, SinkError> {
        PngSequence::create(&self.dir, self.size, self.background)
    }
}
