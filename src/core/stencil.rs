//! Finite-difference operators over periodic grids.

use crate::core::grid::Grid;
use crate::core::params::SimulationParams;
use crate::core::state::FieldState;

/// 5-point discrete Laplacian at `(x, y)`.
#[inline]
pub fn laplacian(a: &Grid, params: &SimulationParams, x: i64, y: i64) -> f32 {
    let centre = a.get(x, y);
    let d2x = (a.get(x - 1, y) + a.get(x + 1, y) - 2.0 * centre) / (params.dx * params.dx);
    let d2y = (a.get(x, y - 1) + a.get(x, y + 1) - 2.0 * centre) / (params.dy * params.dy);
    d2x + d2y
}

/// `c^2 * laplacian(a)` for every cell.
pub fn acceleration(a: &Grid, params: &SimulationParams) -> Grid {
    let c2 = params.speed_sq();
    Grid::from_rows(a, |y, row| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = c2 * laplacian(a, params, x as i64, y as i64);
        }
    })
}

/// Time derivative of the first-order system:
/// `d/dt (amplitude, velocity) = (velocity, c^2 * laplacian(amplitude))`.
///
/// The system is autonomous, `_t` is accepted for the RK4 signature.
pub fn wave_derivative(_t: f32, state: &FieldState, params: &SimulationParams) -> FieldState {
    FieldState {
        amplitude: state.velocity.clone(),
        velocity: acceleration(&state.amplitude, params),
    }
}

/// Local energy density `0.5 * (v^2 + c^2 |grad a|^2)` using central
/// differences. A missing velocity counts as zero.
pub fn energy_density(amplitude: &Grid, velocity: Option<&Grid>, params: &SimulationParams) -> Grid {
    let c2 = params.speed_sq();
    Grid::from_rows(amplitude, |y, row| {
        let y = y as i64;
        for (x, out) in row.iter_mut().enumerate() {
            let x = x as i64;
            let dadx = (amplitude.get(x + 1, y) - amplitude.get(x - 1, y)) / (2.0 * params.dx);
            let dady = (amplitude.get(x, y + 1) - amplitude.get(x, y - 1)) / (2.0 * params.dy);
            let v = velocity.map_or(0.0, |vel| vel.get(x, y));
            *out = 0.5 * (v * v + c2 * (dadx * dadx + dady * dady));
        }
    })
}
