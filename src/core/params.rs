/// Physical and discretisation constants of one run.
///
/// Stability is the caller's job: for the three-level scheme keep
/// `rx + ry <= 1` (see [`SimulationParams::courant`]).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationParams {
    pub wave_speed: f32,
    pub dx: f32,
    pub dy: f32,
    pub dt: f32,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            wave_speed: 1.0,
            dx: 0.01,
            dy: 0.01,
            dt: 0.001,
        }
    }
}

impl SimulationParams {
    /// Squared Courant numbers `((c*dt/dx)^2, (c*dt/dy)^2)`.
    pub fn courant(&self) -> (f32, f32) {
        let rx = self.wave_speed * self.dt / self.dx;
        let ry = self.wave_speed * self.dt / self.dy;
        (rx * rx, ry * ry)
    }

    pub fn speed_sq(&self) -> f32 {
        self.wave_speed * self.wave_speed
    }
}
