//! Weighted statistical moments used by the line/rectangle/ellipse fits.

/// 0th, 1st and 2nd weighted moments of a set of points.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Moments {
    pub s: f64,
    pub sx: f64,
    pub sy: f64,
    pub sxx: f64,
    pub sxy: f64,
    pub syy: f64,
}

/// A line fitted to a set of moments.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct Line {
    /// A point on the line.
    pub bx: f64,
    pub by: f64,
    /// Direction angle, folded into `[-pi, pi]`.
    pub angle: f64,
    /// Standard deviation of the fitted points; 0 if not requested.
    pub weight: f64,
    /// Loss function value; lower is a better line fit.
    pub loss: f64,
}

impl Moments {
    pub fn add_point(&mut self, x: f64, y: f64, weight: f64) {
        self.s += weight;
        self.sx += weight * x;
        self.sy += weight * y;
        self.sxx += weight * x * x;
        self.sxy += weight * x * y;
        self.syy += weight * y * y;
    }

    pub fn add_assign(&mut self, other: &Moments) {
        self.s += other.s;
        self.sx += other.sx;
        self.sy += other.sy;
        self.sxx += other.sxx;
        self.sxy += other.sxy;
        self.syy += other.syy;
    }

    pub fn reset(&mut self) {
        *self = Moments::default();
    }

    /// Variance of the fitted points, normalized by total weight.
    pub fn var(&self) -> f64 {
        (self.sxx - self.sx * self.sx / self.s + self.syy - self.sy * self.sy / self.s) / self.s
    }

    /// Standard deviation, normalized by total weight.
    pub fn std(&self) -> f64 {
        let v = self.s * self.sxx - self.sx * self.sx + self.s * self.syy - self.sy * self.sy;
        v.max(0.0).sqrt() / self.s
    }

    /// Closed-form line fit through these moments.
    pub fn line(&self, calc_weight: bool) -> Line {
        let n = self.sy * self.sy - self.s * self.syy + self.s * self.sxx - self.sx * self.sx;
        let d = 2.0 * (self.sx * self.sy - self.s * self.sxy);
        let ay = n - (n * n + d * d).sqrt();
        let denom = (d * d + ay * ay)
            * (self.s * self.sxx - self.sx * self.sx + self.s * self.syy - self.sy * self.sy);
        let loss = if denom.abs() < 1e-12 {
            0.0
        } else {
            (d * d * (self.s * self.syy - self.sy * self.sy)
                + ay * ay * (self.s * self.sxx - self.sx * self.sx)
                + 2.0 * d * ay * (self.sx * self.sy - self.s * self.sxy))
                / denom
        };
        let mut angle = ay.atan2(d);
        if angle > std::f64::consts::PI {
            angle -= std::f64::consts::PI;
        } else if angle < -std::f64::consts::PI {
            angle += std::f64::consts::PI;
        }
        Line {
            bx: self.sx / self.s,
            by: self.sy / self.s,
            angle,
            weight: if calc_weight { self.std() } else { 0.0 },
            loss,
        }
    }
}

/// Third and fourth weighted moments, computed lazily only for the ellipse
/// fit (the line/rectangle fits never need them).
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct HigherMoments {
    pub sxxx: f64,
    pub sxxy: f64,
    pub sxyy: f64,
    pub syyy: f64,
    pub sxxxx: f64,
    pub sxxyy: f64,
    pub syyyy: f64,
}

impl HigherMoments {
    pub fn add_point(&mut self, x: f64, y: f64, weight: f64) {
        self.sxxx += weight * x * x * x;
        self.sxxy += weight * x * x * y;
        self.sxyy += weight * x * y * y;
        self.syyy += weight * y * y * y;
        self.sxxxx += weight * x * x * x * x;
        self.sxxyy += weight * x * x * y * y;
        self.syyyy += weight * y * y * y * y;
    }
}
