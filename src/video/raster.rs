use image::{Rgba, RgbaImage};

use crate::core::colormap::Rgba as Color;
use crate::sim::surface::{SurfaceFrame, SurfaceMode};

/// Rasterises `frame` so that its `[-1, 1]^2` extent fills the image.
/// Colours are composited over `background`.
pub fn rasterize(frame: &SurfaceFrame, size: [u32; 2], background: Color) -> RgbaImage {
    let [w_img, h_img] = size;
    let (w, h) = (frame.width(), frame.height());

    RgbaImage::from_fn(w_img, h_img, |px, py| {
        let color = match frame.mode() {
            SurfaceMode::Flat => {
                frame
                    .vertex(cell_index(px, w_img, w), cell_index(py, h_img, h))
                    .color
            }
            SurfaceMode::Smooth => {
                bilinear(frame, grid_coord(px, w_img, w), grid_coord(py, h_img, h))
            }
        };
        to_pixel(composite(color, background))
    })
}

/// Cell under a pixel centre when the axis is split into `n` equal cells.
fn cell_index(p: u32, pixels: u32, n: usize) -> usize {
    let u = (p as f32 + 0.5) / pixels as f32;
    ((u * n as f32).floor() as usize).min(n - 1)
}

/// Maps a pixel centre onto the continuous grid axis `[0, n - 1]`.
fn grid_coord(p: u32, pixels: u32, n: usize) -> f32 {
    let u = (p as f32 + 0.5) / pixels as f32;
    (u * (n - 1) as f32).clamp(0.0, (n - 1) as f32)
}

fn bilinear(frame: &SurfaceFrame, gx: f32, gy: f32) -> Color {
    let x0 = gx.floor() as usize;
    let y0 = gy.floor() as usize;
    let x1 = (x0 + 1).min(frame.width() - 1);
    let y1 = (y0 + 1).min(frame.height() - 1);
    let (fx, fy) = (gx - x0 as f32, gy - y0 as f32);

    let c00 = frame.vertex(x0, y0).color;
    let c10 = frame.vertex(x1, y0).color;
    let c01 = frame.vertex(x0, y1).color;
    let c11 = frame.vertex(x1, y1).color;

    let mut out = [0.0; 4];
    for c in 0..4 {
        let top = c00[c] + (c10[c] - c00[c]) * fx;
        let bottom = c01[c] + (c11[c] - c01[c]) * fx;
        out[c] = top + (bottom - top) * fy;
    }
    out
}

fn composite(color: Color, background: Color) -> Color {
    let a = color[3].clamp(0.0, 1.0);
    [
        color[0] * a + background[0] * (1.0 - a),
        color[1] * a + background[1] * (1.0 - a),
        color[2] * a + background[2] * (1.0 - a),
        a + background[3] * (1.0 - a),
    ]
}

fn to_pixel(c: Color) -> Rgba<u8> {
    Rgba(c.map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8))
}
