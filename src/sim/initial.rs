use crate::core::grid::Grid;
use crate::core::state::FieldState;

/// Starting configuration of the field.
#[derive(Clone, Debug, PartialEq)]
pub enum InitialCondition {
    /// A 2x2 block at `peak` with `shoulder`-high cells on each side, at
    /// rest. `center` is a fraction of the grid size.
    Plus {
        center: [f32; 2],
        peak: f32,
        shoulder: f32,
    },
    /// `amplitude * exp(-sharpness * r^2)` around the grid centre, with
    /// coordinates normalised to `[-0.5, 0.5]`. Velocity is the same bump
    /// times `velocity_scale`.
    Gaussian {
        amplitude: f32,
        sharpness: f32,
        velocity_scale: f32,
    },
}

impl InitialCondition {
    pub fn build(&self, width: usize, height: usize) -> FieldState {
        match *self {
            Self::Plus {
                center,
                peak,
                shoulder,
            } => {
                let mut g = Grid::new(width, height);
                let cx = (center[0] * width as f32).floor() as i64;
                let cy = (center[1] * height as f32).floor() as i64;
                for (dx, dy) in [(-1, -1), (0, -1), (-1, 0), (0, 0)] {
                    g.set(cx + dx, cy + dy, peak);
                }
                for d in [-1, 0] {
                    g.set(cx + d, cy - 2, shoulder);
                    g.set(cx + d, cy + 1, shoulder);
                    g.set(cx - 2, cy + d, shoulder);
                    g.set(cx + 1, cy + d, shoulder);
                }
                FieldState::at_rest(g)
            }
            Self::Gaussian {
                amplitude,
                sharpness,
                velocity_scale,
            } => {
                let norm = |n: usize, i: usize| {
                    if n > 1 {
                        i as f32 / (n - 1) as f32 - 0.5
                    } else {
                        0.0
                    }
                };
                let amp = Grid::from_fn(width, height, |x, y| {
                    let fx = norm(width, x);
                    let fy = norm(height, y);
                    amplitude * (-sharpness * (fx * fx + fy * fy)).exp()
                });
                let vel = amp.scale(velocity_scale);
                FieldState::new(amp, vel)
            }
        }
    }
}
