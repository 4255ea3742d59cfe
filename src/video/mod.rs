//! Output sink for recordings.
//!
//! A sink is opened when a recording starts, receives frames in order from
//! the controller thread only, and is consumed by [`FrameSink::finish`] so
//! it cannot be closed twice.

pub mod raster;
pub mod writer;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("output directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

pub trait FrameSink<F> {
    fn write_frame(&mut self, frame: &F) -> Result<(), SinkError>;

    /// Flushes and releases the sink. Returns the number of frames written.
    fn finish(self) -> Result<usize, SinkError>;
}

/// Opens a fresh sink for each recording session.
pub trait SinkFactory<F> {
    type Sink: FrameSink<F>;

    fn open(&mut self) -> Result<Self::Sink, SinkError>;
}
