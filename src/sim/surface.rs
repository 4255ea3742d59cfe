//! Renderable frames: a grid of coloured points in normalised coordinates.

use serde::{Deserialize, Serialize};

use crate::core::colormap::{Colormap, Rgba};
use crate::core::grid::Grid;
use crate::core::params::SimulationParams;
use crate::core::state::FieldState;
use crate::core::stencil::energy_density;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceMode {
    /// One colour per cell.
    #[default]
    Flat,
    /// Colours interpolated between neighbouring points.
    Smooth,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    #[default]
    Amplitude,
    Energy,
    Grayscale,
}

/// Point position in `[-1, 1]^2` (y up) and its colour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

/// Row-major points of a `width`-wide grid, top row first.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceFrame {
    width: usize,
    mode: SurfaceMode,
    vertices: Vec<Vertex>,
}

impl SurfaceFrame {
    pub fn new(width: usize, mode: SurfaceMode, vertices: Vec<Vertex>) -> Self {
        debug_assert!(width > 0 && vertices.len() % width == 0);
        Self {
            width,
            mode,
            vertices,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.vertices.len() / self.width
    }

    pub fn point_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn mode(&self) -> SurfaceMode {
        self.mode
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Point at column `x`, row `y` (row 0 is the top).
    pub fn vertex(&self, x: usize, y: usize) -> &Vertex {
        &self.vertices[y * self.width + x]
    }
}

/// Read access to the fields a frame can be derived from.
pub trait FieldView {
    fn amplitude(&self) -> &Grid;

    fn velocity(&self) -> Option<&Grid> {
        None
    }
}

impl FieldView for Grid {
    fn amplitude(&self) -> &Grid {
        self
    }
}

impl FieldView for FieldState {
    fn amplitude(&self) -> &Grid {
        &self.amplitude
    }

    fn velocity(&self) -> Option<&Grid> {
        Some(&self.velocity)
    }
}

/// Converts simulation state into [`SurfaceFrame`]s.
#[derive(Clone, Debug)]
pub struct SurfaceRenderer {
    view: View,
    mode: SurfaceMode,
    params: SimulationParams,
    colormap: Colormap,
}

impl SurfaceRenderer {
    pub fn new(view: View, mode: SurfaceMode, params: SimulationParams) -> Self {
        let colormap = match view {
            View::Amplitude => Colormap::amplitude(),
            View::Energy => Colormap::energy(),
            View::Grayscale => Colormap::grayscale(),
        };
        Self::with_colormap(view, mode, params, colormap)
    }

    pub fn with_colormap(
        view: View,
        mode: SurfaceMode,
        params: SimulationParams,
        colormap: Colormap,
    ) -> Self {
        Self {
            view,
            mode,
            params,
            colormap,
        }
    }

    pub fn render<S: FieldView>(&self, state: &S) -> SurfaceFrame {
        let scalars = match self.view {
            View::Energy => {
                energy_density(state.amplitude(), state.velocity(), &self.params)
            }
            View::Amplitude | View::Grayscale => state.amplitude().clone(),
        };
        self.colorize(&scalars)
    }

    fn colorize(&self, field: &Grid) -> SurfaceFrame {
        let [w, h] = field.dimensions();
        let span = |n: usize, i: usize| {
            if n > 1 {
                2.0 * i as f32 / (n - 1) as f32 - 1.0
            } else {
                0.0
            }
        };

        let vertices = field
            .values()
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                let (x, y) = (i % w, i / w);
                Vertex {
                    position: [span(w, x), -span(h, y)],
                    color: self.colormap.to_color(v),
                }
            })
            .collect();

        SurfaceFrame::new(w, self.mode, vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_exposes_grid_layout() {
        let g = Grid::from_fn(4, 3, |x, y| (x + y) as f32 * 0.1);
        let r = SurfaceRenderer::new(View::Amplitude, SurfaceMode::Smooth, SimulationParams::default());
        let f = r.render(&g);

        assert_eq!(f.width(), 4);
        assert_eq!(f.height(), 3);
        assert_eq!(f.point_count(), 12);
        assert_eq!(f.mode(), SurfaceMode::Smooth);
        assert_eq!(f.vertex(0, 0).position, [-1.0, 1.0]);
        assert_eq!(f.vertex(3, 2).position, [1.0, -1.0]);
        assert_eq!(f.vertex(0, 0).color, Colormap::amplitude().to_color(0.0));
    }

    #[test]
    fn energy_view_of_resting_flat_field_is_base_colour() {
        let state = FieldState::at_rest(Grid::from_fn(3, 3, |_, _| 0.7));
        let r = SurfaceRenderer::new(View::Energy, SurfaceMode::Flat, SimulationParams::default());
        let f = r.render(&state);
        let base = Colormap::energy().points()[0].color;
        assert!(f.vertices().iter().all(|v| v.color == base));
    }

    #[test]
    fn single_column_grid_is_centred() {
        let g = Grid::new(1, 1);
        let r = SurfaceRenderer::new(View::Grayscale, SurfaceMode::Flat, SimulationParams::default());
        assert_eq!(r.render(&g).vertex(0, 0).position, [0.0, 0.0]);
    }
}
