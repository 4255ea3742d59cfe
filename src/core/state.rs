use crate::core::grid::Grid;

/// Minimal vector-space contract needed by the Runge-Kutta stepper.
pub trait OdeState: Sized {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, c: f32) -> Self;
}

impl OdeState for f32 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, c: f32) -> Self {
        c * self
    }
}

impl OdeState for f64 {
    fn add(&self, other: &Self) -> Self {
        self + other
    }

    fn scale(&self, c: f32) -> Self {
        c as f64 * self
    }
}

impl OdeState for Grid {
    fn add(&self, other: &Self) -> Self {
        Grid::add(self, other)
    }

    fn scale(&self, c: f32) -> Self {
        Grid::scale(self, c)
    }
}

/// Amplitude/velocity pair of the first-order wave system.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldState {
    pub amplitude: Grid,
    pub velocity: Grid,
}

impl FieldState {
    pub fn new(amplitude: Grid, velocity: Grid) -> Self {
        assert_eq!(
            amplitude.dimensions(),
            velocity.dimensions(),
            "amplitude and velocity must share dimensions"
        );
        Self {
            amplitude,
            velocity,
        }
    }

    /// State with zero velocity.
    pub fn at_rest(amplitude: Grid) -> Self {
        let velocity = Grid::like(&amplitude);
        Self {
            amplitude,
            velocity,
        }
    }

    pub fn dimensions(&self) -> [usize; 2] {
        self.amplitude.dimensions()
    }
}

impl OdeState for FieldState {
    fn add(&self, other: &Self) -> Self {
        Self {
            amplitude: self.amplitude.add(&other.amplitude),
            velocity: self.velocity.add(&other.velocity),
        }
    }

    fn scale(&self, c: f32) -> Self {
        Self {
            amplitude: self.amplitude.scale(c),
            velocity: self.velocity.scale(c),
        }
    }
}
