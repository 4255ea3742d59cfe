//! Piecewise-linear scalar to RGBA mapping.

pub type Rgba = [f32; 4];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControlPoint {
    pub threshold: f32,
    pub color: Rgba,
}

impl ControlPoint {
    pub const fn new(threshold: f32, color: Rgba) -> Self {
        Self { threshold, color }
    }
}

/// Control points sorted strictly ascending by threshold, at least two.
#[derive(Clone, Debug, PartialEq)]
pub struct Colormap {
    points: Vec<ControlPoint>,
}

impl Colormap {
    pub fn new(points: Vec<ControlPoint>) -> Self {
        debug_assert!(points.len() >= 2, "colormap needs at least two points");
        debug_assert!(
            points.windows(2).all(|w| w[0].threshold < w[1].threshold),
            "colormap thresholds must be strictly increasing"
        );
        Self { points }
    }

    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Clamps outside the threshold range; exact at control points.
    pub fn to_color(&self, v: f32) -> Rgba {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if v.is_nan() || v < first.threshold {
            return first.color;
        }
        if v >= last.threshold {
            return last.color;
        }

        // first point with threshold > v; always in 1..len here
        let hi = self.points.partition_point(|p| p.threshold <= v);
        let lo = self.points[hi - 1];
        let hi = self.points[hi];
        if v == lo.threshold {
            return lo.color;
        }

        let alpha = (v - lo.threshold) / (hi.threshold - lo.threshold);
        let mut out = [0.0; 4];
        for c in 0..4 {
            let (a, b) = (lo.color[c], hi.color[c]);
            out[c] = (a + (b - a) * alpha).clamp(a.min(b), a.max(b));
        }
        out
    }

    /// Diverging map for signed amplitudes on [-1, 1].
    pub fn amplitude() -> Self {
        Self::new(vec![
            ControlPoint::new(-1.00, [0.35, 0.10, 0.10, 1.00]),
            ControlPoint::new(-0.66, [1.00, 0.20, 0.40, 1.00]),
            ControlPoint::new(-0.33, [1.00, 0.80, 0.70, 1.00]),
            ControlPoint::new(0.00, [1.00, 1.00, 1.00, 1.00]),
            ControlPoint::new(0.33, [0.55, 0.75, 0.85, 1.00]),
            ControlPoint::new(0.66, [0.15, 0.30, 0.55, 1.00]),
            ControlPoint::new(1.00, [0.00, 0.20, 0.25, 1.00]),
        ])
    }

    /// Sequential map for non-negative energy densities.
    pub fn energy() -> Self {
        Self::new(vec![
            ControlPoint::new(0.0, [0.00, 0.00, 0.15, 1.00]),
            ControlPoint::new(256.0, [1.00, 0.70, 0.00, 1.00]),
            ControlPoint::new(512.0, [1.00, 1.00, 1.00, 1.00]),
        ])
    }

    /// Grey ramp, white at -0.5 and black at 1.5.
    pub fn grayscale() -> Self {
        Self::new(vec![
            ControlPoint::new(-0.5, [1.0, 1.0, 1.0, 1.0]),
            ControlPoint::new(1.5, [0.0, 0.0, 0.0, 1.0]),
        ])
    }
}
