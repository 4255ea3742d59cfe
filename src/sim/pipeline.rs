//! Precomputes the whole frame sequence before playback.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::core::integrator::{wave_rk4, Integrator, Leapfrog};
use crate::core::params::SimulationParams;
use crate::sim::initial::InitialCondition;
use crate::sim::surface::{SurfaceFrame, SurfaceRenderer};

const LOG_EVERY: usize = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scheme {
    #[default]
    Leapfrog,
    RungeKutta,
}

/// Immutable, index-addressable frame sequence.
#[derive(Clone, Debug)]
pub struct FrameBuffer<F> {
    frames: Vec<F>,
}

impl<F> FrameBuffer<F> {
    pub fn from_frames(frames: Vec<F>) -> Self {
        Self { frames }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&F> {
        self.frames.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.frames.iter()
    }
}

impl<F> std::ops::Index<usize> for FrameBuffer<F> {
    type Output = F;

    fn index(&self, index: usize) -> &F {
        &self.frames[index]
    }
}

/// Renders the current state, then advances one step, `count` times.
/// Entry `i` is therefore the state after `i` steps.
pub fn precompute<I, F>(
    integrator: &mut I,
    count: usize,
    mut render: impl FnMut(&I::State) -> F,
) -> FrameBuffer<F>
where
    I: Integrator,
{
    let mut frames = Vec::with_capacity(count);
    for frame in 0..count {
        frames.push(render(integrator.state()));
        integrator.advance();

        if frame % LOG_EVERY == 0 {
            info!(frame, count, "precompute");
        }
    }
    FrameBuffer::from_frames(frames)
}

/// Everything needed to build the renderable sequence.
#[derive(Clone, Debug)]
pub struct PipelinePlan {
    pub scheme: Scheme,
    pub width: usize,
    pub height: usize,
    pub frames: usize,
    pub params: SimulationParams,
    pub initial: InitialCondition,
}

pub fn build_frames(plan: &PipelinePlan, renderer: &SurfaceRenderer) -> FrameBuffer<SurfaceFrame> {
    let initial = plan.initial.build(plan.width, plan.height);
    info!(
        scheme = ?plan.scheme,
        width = plan.width,
        height = plan.height,
        frames = plan.frames,
        "precomputing frames"
    );

    let buffer = match plan.scheme {
        Scheme::Leapfrog => {
            if initial.velocity.max_abs() > 0.0 {
                warn!("leapfrog starts at rest; initial velocity is ignored");
            }
            let mut lf = Leapfrog::at_rest(initial.amplitude, &plan.params);
            let (rx, ry) = lf.courant();
            if rx + ry > 1.0 {
                warn!(rx, ry, "Courant numbers outside the stable region");
            }
            precompute(&mut lf, plan.frames, |s| renderer.render(s))
        }
        Scheme::RungeKutta => {
            let mut rk = wave_rk4(initial, plan.params);
            precompute(&mut rk, plan.frames, |s| renderer.render(s))
        }
    };

    info!(frames = buffer.len(), "precompute done");
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::grid::Grid;
    use crate::core::state::FieldState;
    use crate::sim::surface::{SurfaceMode, View};

    #[test]
    fn entry_i_is_state_after_i_steps() {
        let params = SimulationParams::default();
        let mut seed = Grid::new(8, 8);
        seed.set(3, 4, 1.0);

        let mut lf = Leapfrog::at_rest(seed.clone(), &params);
        let buf = precompute(&mut lf, 6, |g| g.clone());
        assert_eq!(buf.len(), 6);

        for i in 0..6 {
            let mut fresh = Leapfrog::at_rest(seed.clone(), &params);
            for _ in 0..i {
                fresh.advance();
            }
            assert_eq!(&buf[i], fresh.state(), "frame {i}");
        }
    }

    #[test]
    fn rk4_entry_i_is_state_after_i_steps() {
        let params = SimulationParams::default();
        let amp = Grid::from_fn(6, 5, |x, y| ((x * 3 + y) % 4) as f32 * 0.25);
        let vel = Grid::from_fn(6, 5, |x, y| 0.5 - ((x + 2 * y) % 3) as f32 * 0.3);
        let initial = FieldState::new(amp, vel);

        let mut rk = wave_rk4(initial.clone(), params);
        let buf = precompute(&mut rk, 5, |s| s.clone());
        assert_eq!(buf.len(), 5);
        assert_eq!(buf[0], initial);

        for i in 0..5 {
            let mut fresh = wave_rk4(initial.clone(), params);
            for _ in 0..i {
                fresh.advance();
            }
            assert_eq!(&buf[i], fresh.state(), "frame {i}");
        }
        assert_ne!(buf[0], buf[4]);
    }

    #[test]
    fn zero_frames_is_empty() {
        let mut lf = Leapfrog::at_rest(Grid::new(2, 2), &SimulationParams::default());
        let buf = precompute(&mut lf, 0, |g| g.clone());
        assert!(buf.is_empty());
        assert!(buf.get(0).is_none());
    }

    #[test]
    fn build_frames_for_both_schemes() {
        let params = SimulationParams {
            dt: 0.002,
            ..SimulationParams::default()
        };
        let renderer = SurfaceRenderer::new(View::Amplitude, SurfaceMode::Flat, params);
        for scheme in [Scheme::Leapfrog, Scheme::RungeKutta] {
            let plan = PipelinePlan {
                scheme,
                width: 12,
                height: 10,
                frames: 4,
                params,
                initial: InitialCondition::Plus {
                    center: [0.5, 0.5],
                    peak: 1.0,
                    shoulder: 0.5,
                },
            };
            let buf = build_frames(&plan, &renderer);
            assert_eq!(buf.len(), 4);
            assert!(buf.iter().all(|f| f.width() == 12 && f.height() == 10));
            assert_ne!(buf[0], buf[3], "{scheme:?} should evolve");
        }
    }
}
