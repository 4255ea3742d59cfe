//! Numerical core: periodic grids, stencils, integrators, colour mapping.

pub mod colormap;
pub mod grid;
pub mod integrator;
pub mod params;
pub mod state;
pub mod stencil;
