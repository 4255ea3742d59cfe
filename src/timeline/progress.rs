use std::fmt;
use std::time::Duration;

/// Recording progress and a linear estimate of the time left.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub fraction: f32,
    pub elapsed: Duration,
    pub estimated_total: Duration,
    pub remaining: Duration,
}

impl Progress {
    const MIN_FRACTION: f32 = 1e-6;

    pub fn estimate(fraction: f32, elapsed: Duration) -> Self {
        let estimated_total = if fraction > Self::MIN_FRACTION {
            Duration::from_secs_f64(elapsed.as_secs_f64() / fraction as f64)
        } else {
            Duration::ZERO
        };
        Self {
            fraction,
            elapsed,
            estimated_total,
            remaining: estimated_total.saturating_sub(elapsed),
        }
    }
}

/// `mm:ss`, minutes are not wrapped at the hour.
pub fn format_mm_ss(d: Duration) -> String {
    let secs = d.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:5.1}% elapsed {} total {} remaining {}",
            100.0 * self.fraction,
            format_mm_ss(self.elapsed),
            format_mm_ss(self.estimated_total),
            format_mm_ss(self.remaining)
        )
    }
}
