//! Frame precomputation: initial conditions, state to frame conversion,
//! and the sequential driver that fills the frame buffer.

pub mod initial;
pub mod pipeline;
pub mod surface;
