//! Time integrators for the wave equation.
//!
//! Two schemes with different trade-offs live side by side:
//! - [`Leapfrog`]: three-level explicit update on the amplitude alone.
//! - [`RungeKutta`]: classic RK4 over any [`OdeState`], used with
//!   [`FieldState`] and [`wave_derivative`].

use crate::core::grid::Grid;
use crate::core::params::SimulationParams;
use crate::core::state::{FieldState, OdeState};
use crate::core::stencil::wave_derivative;

/// A stepper that owns its state and advances it by one fixed step.
pub trait Integrator {
    type State;

    fn state(&self) -> &Self::State;

    fn advance(&mut self);
}

/// Three-level explicit scheme:
/// `new = rx*(l + r) + ry*(u + d) + 2(1 - rx - ry)*cur - prev`.
#[derive(Clone, Debug)]
pub struct Leapfrog {
    current: Grid,
    previous: Grid,
    rx: f32,
    ry: f32,
}

impl Leapfrog {
    pub fn new(current: Grid, previous: Grid, params: &SimulationParams) -> Self {
        assert_eq!(
            current.dimensions(),
            previous.dimensions(),
            "snapshots must share dimensions"
        );
        let (rx, ry) = params.courant();
        Self {
            current,
            previous,
            rx,
            ry,
        }
    }

    /// Seeds both levels with the same field, i.e. zero initial velocity.
    pub fn at_rest(field: Grid, params: &SimulationParams) -> Self {
        let previous = field.clone();
        Self::new(field, previous, params)
    }

    pub fn current(&self) -> &Grid {
        &self.current
    }

    pub fn previous(&self) -> &Grid {
        &self.previous
    }

    pub fn courant(&self) -> (f32, f32) {
        (self.rx, self.ry)
    }

    fn next_field(&self) -> Grid {
        let cur = &self.current;
        let prev = &self.previous;
        let (rx, ry) = (self.rx, self.ry);
        let centre_w = 2.0 * (1.0 - rx - ry);

        Grid::from_rows(cur, |y, row| {
            let y = y as i64;
            for (x, out) in row.iter_mut().enumerate() {
                let x = x as i64;
                *out = rx * (cur.get(x - 1, y) + cur.get(x + 1, y))
                    + ry * (cur.get(x, y - 1) + cur.get(x, y + 1))
                    + centre_w * cur.get(x, y)
                    - prev.get(x, y);
            }
        })
    }
}

impl Integrator for Leapfrog {
    type State = Grid;

    fn state(&self) -> &Grid {
        &self.current
    }

    fn advance(&mut self) {
        let next = self.next_field();
        self.previous = std::mem::replace(&mut self.current, next);
    }
}

/// One classic RK4 step of size `h` from `(t, y)`.
///
/// Pure: no state is kept between calls.
pub fn rk4_step<S, F>(t: f32, y: &S, h: f32, f: F) -> S
where
    S: OdeState,
    F: Fn(f32, &S) -> S,
{
    let half = 0.5 * h;
    let k1 = f(t, y);
    let k2 = f(t + half, &y.add(&k1.scale(half)));
    let k3 = f(t + half, &y.add(&k2.scale(half)));
    let k4 = f(t + h, &y.add(&k3.scale(h)));

    let sum = k1
        .add(&k2.scale(2.0))
        .add(&k3.scale(2.0))
        .add(&k4);
    y.add(&sum.scale(h / 6.0))
}

/// Fixed-step RK4 driver around [`rk4_step`].
pub struct RungeKutta<S, F> {
    t: f32,
    h: f32,
    state: S,
    derivative: F,
}

impl<S, F> RungeKutta<S, F>
where
    S: OdeState,
    F: Fn(f32, &S) -> S,
{
    pub fn new(initial: S, h: f32, derivative: F) -> Self {
        Self {
            t: 0.0,
            h,
            state: initial,
            derivative,
        }
    }

    pub fn time(&self) -> f32 {
        self.t
    }
}

impl<S, F> Integrator for RungeKutta<S, F>
where
    S: OdeState,
    F: Fn(f32, &S) -> S,
{
    type State = S;

    fn state(&self) -> &S {
        &self.state
    }

    fn advance(&mut self) {
        self.state = rk4_step(self.t, &self.state, self.h, &self.derivative);
        self.t += self.h;
    }
}

/// RK4 over the wave system with step `params.dt`.
pub fn wave_rk4(
    initial: FieldState,
    params: SimulationParams,
) -> RungeKutta<FieldState, impl Fn(f32, &FieldState) -> FieldState> {
    RungeKutta::new(initial, params.dt, move |t, s: &FieldState| {
        wave_derivative(t, s, &params)
    })
}
