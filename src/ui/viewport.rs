//! Draws [`SurfaceFrame`]s into an egui rect.

use egui::epaint::Mesh;
use egui::{Color32, Painter, Pos2, Rect, Shape, Vec2, pos2, vec2};

use crate::core::colormap::Rgba;
use crate::sim::surface::{SurfaceFrame, SurfaceMode};
use crate::timeline::FrameDisplay;

/// Keeps the most recently shown frame as a mesh in unit coordinates
/// (`[0, 1]^2`, y down) and paints it into whatever rect the panel gives.
pub struct SurfaceView {
    mesh: Mesh,
    shown: Option<usize>,
    size: [f32; 2],
    tile_neighbors: bool,
}

impl SurfaceView {
    pub fn new(size: [f32; 2], tile_neighbors: bool) -> Self {
        Self {
            mesh: Mesh::default(),
            shown: None,
            size,
            tile_neighbors,
        }
    }

    /// Index of the frame currently held, if any.
    pub fn shown(&self) -> Option<usize> {
        self.shown
    }

    pub fn set_size(&mut self, size: Vec2) {
        self.size = [size.x, size.y];
    }

    /// Paints into the largest centred square of `rect`. With neighbour
    /// tiling on, periodic copies fill the space to the left and right.
    pub fn paint(&self, painter: &Painter, rect: Rect) {
        if self.mesh.is_empty() {
            return;
        }
        let side = rect.width().min(rect.height());
        let origin = rect.center() - vec2(side, side) * 0.5;

        let span = if self.tile_neighbors {
            ((rect.width() - side) * 0.5 / side).ceil() as i32
        } else {
            0
        };
        let painter = painter.with_clip_rect(rect);
        for k in -span..=span {
            let offset = origin + vec2(k as f32 * side, 0.0);
            painter.add(Shape::mesh(self.placed(offset, side)));
        }
    }

    fn placed(&self, origin: Pos2, side: f32) -> Mesh {
        let mut mesh = self.mesh.clone();
        for v in &mut mesh.vertices {
            v.pos = origin + v.pos.to_vec2() * side;
        }
        mesh
    }
}

impl FrameDisplay<SurfaceFrame> for SurfaceView {
    fn size(&self) -> [f32; 2] {
        self.size
    }

    fn show(&mut self, index: usize, frame: &SurfaceFrame) {
        if self.shown == Some(index) {
            return;
        }
        self.mesh = build_mesh(frame);
        self.shown = Some(index);
    }
}

pub fn to_color32(c: Rgba) -> Color32 {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(byte(c[0]), byte(c[1]), byte(c[2]), byte(c[3]))
}

/// Unit-square mesh of a frame.
pub fn build_mesh(frame: &SurfaceFrame) -> Mesh {
    let (w, h) = (frame.width(), frame.height());
    let mut mesh = Mesh::default();
    match frame.mode() {
        SurfaceMode::Flat => {
            let cell = vec2(1.0 / w as f32, 1.0 / h as f32);
            for y in 0..h {
                for x in 0..w {
                    let min = pos2(x as f32 * cell.x, y as f32 * cell.y);
                    let rect = Rect::from_min_size(min, cell);
                    mesh.add_colored_rect(rect, to_color32(frame.vertex(x, y).color));
                }
            }
        }
        SurfaceMode::Smooth => {
            for v in frame.vertices() {
                let [px, py] = v.position;
                let pos = pos2((px + 1.0) * 0.5, (1.0 - py) * 0.5);
                mesh.colored_vertex(pos, to_color32(v.color));
            }
            for y in 0..h.saturating_sub(1) {
                for x in 0..w.saturating_sub(1) {
                    let i = (y * w + x) as u32;
                    let right = i + 1;
                    let below = i + w as u32;
                    mesh.add_triangle(i, right, below);
                    mesh.add_triangle(right, below + 1, below);
                }
            }
        }
    }
    mesh
}
