//! Sampling primitives for simulated future trends and interval bounds.

use rand::Rng;
use std::f64::consts::PI;

/// Above this mean the Poisson draw switches to a normal approximation.
const POISSON_NORMAL_CUTOFF: f64 = 30.0;

pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // Box-Muller; u1 in (0, 1] keeps ln finite.
    let u1: f64 = 1.0 - rng.gen::<f64>();
    let u2: f64 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

pub fn laplace<R: Rng + ?Sized>(rng: &mut R, scale: f64) -> f64 {
    let u: f64 = rng.gen::<f64>() - 0.5;
    let tail = (1.0 - 2.0 * u.abs()).max(f64::MIN_POSITIVE);
    -scale * u.signum() * tail.ln()
}

pub fn poisson<R: Rng + ?Sized>(rng: &mut R, mean: f64) -> usize {
    if mean <= 0.0 || !mean.is_finite() {
        return 0;
    }
    if mean > POISSON_NORMAL_CUTOFF {
        let x = mean + mean.sqrt() * standard_normal(rng);
        return x.round().max(0.0) as usize;
    }
    // Knuth
    let limit = (-mean).exp();
    let mut k = 0usize;
    let mut p = 1.0;
    loop {
        p *= rng.gen::<f64>();
        if p <= limit {
            return k;
        }
        k += 1;
    }
}

/// One simulated set of future changepoints: `(t, delta)` in scaled time,
/// all with `t > 1`.
#[derive(Debug, Clone, Default)]
pub struct TrendPath {
    pub changes: Vec<(f64, f64)>,
}

impl TrendPath {
    /// Draw new changepoints over `(1, t_max)` at the historical rate.
    pub fn sample<R: Rng + ?Sized>(
        rng: &mut R,
        t_max: f64,
        n_changepoints: usize,
        mean_abs_delta: f64,
    ) -> Self {
        if t_max <= 1.0 || n_changepoints == 0 {
            return Self::default();
        }
        let count = poisson(rng, n_changepoints as f64 * (t_max - 1.0));
        let scale = mean_abs_delta + 1e-8;
        let mut changes: Vec<(f64, f64)> = (0..count)
            .map(|_| {
                let t = 1.0 + rng.gen::<f64>() * (t_max - 1.0);
                (t, laplace(rng, scale))
            })
            .collect();
        changes.sort_by(|a, b| a.0.total_cmp(&b.0));
        Self { changes }
    }

    /// Extra slope contribution at scaled time `t`.
    pub fn offset(&self, t: f64) -> f64 {
        self.changes
            .iter()
            .take_while(|(s, _)| *s < t)
            .map(|(s, delta)| delta * (t - s))
            .sum()
    }
}

/// Linear-interpolated quantile of an already sorted slice, `q` in [0, 1].
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        n => {
            let pos = q.clamp(0.0, 1.0) * (n - 1) as f64;
            let lo = pos.floor() as usize;
            let hi = pos.ceil() as usize;
            let frac = pos - lo as f64;
            sorted[lo] + (sorted[hi] - sorted[lo]) * frac
        }
    }
}

/// Sort `samples` in place and return `(lower, upper)` for a central
/// interval of the given width.
pub fn interval(samples: &mut [f64], width: f64) -> (f64, f64) {
    samples.sort_by(f64::total_cmp);
    let lo_q = (1.0 - width) / 2.0;
    let hi_q = (1.0 + width) / 2.0;
    (quantile_sorted(samples, lo_q), quantile_sorted(samples, hi_q))
}
