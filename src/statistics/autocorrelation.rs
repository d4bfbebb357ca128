/// Streaming autocorrelation accumulator using a ring buffer.
///
/// Computes the normalized autocorrelation function Γ(δ) of a scalar time
/// series without storing the full history. Memory is O(max_lag).
#[derive(Debug, Clone)]
pub struct AutocorrAccum {
    max_lag: usize,
    /// Ring buffer of the most recent `max_lag` values.
    ring: Vec<f64>,
    sum_o: f64,
    sum_o2: f64,
    /// Running sum of o(t)·o(t−δ), length `max_lag + 1`.
    sum_prod: Vec<f64>,
    n_recorded: usize,
    ring_pos: usize,
}

impl AutocorrAccum {
    pub fn new(max_lag: usize) -> Self {
        let max_lag = max_lag.max(1);
        Self {
            max_lag,
            ring: vec![0.0; max_lag],
            sum_o: 0.0,
            sum_o2: 0.0,
            sum_prod: vec![0.0; max_lag + 1],
            n_recorded: 0,
            ring_pos: 0,
        }
    }

    pub fn push(&mut self, o: f64) {
        let pos = self.ring_pos;
        let ml = self.max_lag;
        self.sum_o += o;
        self.sum_o2 += o * o;

        // Lag 0 pairs the value with itself; lags 1..=n_back reach into the ring.
        self.sum_prod[0] += o * o;
        let n_back = self.n_recorded.min(ml);
        for delta in 1..=n_back {
            let idx = (pos + ml - delta) % ml;
            self.sum_prod[delta] += o * self.ring[idx];
        }

        self.ring[pos] = o;
        self.n_recorded += 1;
        self.ring_pos = (pos + 1) % ml;
    }

    pub fn len(&self) -> usize {
        self.n_recorded
    }

    pub fn is_empty(&self) -> bool {
        self.n_recorded == 0
    }

    /// Γ(δ) for δ = 0..=max_lag, with Γ(0) = 1.
    pub fn finish(&self) -> Vec<f64> {
        let m = self.n_recorded as f64;
        let mean = if self.n_recorded > 0 { self.sum_o / m } else { 0.0 };
        let var = if self.n_recorded > 0 {
            self.sum_o2 / m - mean * mean
        } else {
            0.0
        };
        (0..=self.max_lag)
            .map(|delta| {
                let count = self.n_recorded.saturating_sub(delta) as f64;
                if count <= 0.0 || var <= 0.0 {
                    return if delta == 0 { 1.0 } else { 0.0 };
                }
                (self.sum_prod[delta] / count - mean * mean) / var
            })
            .collect()
    }
}

/// Integrated autocorrelation time with Sokal's automatic window (c = 5).
pub fn sokal_tau(gamma: &[f64]) -> f64 {
    let mut tau = 0.5;
    for (w, &g) in gamma.iter().enumerate().skip(1) {
        tau += g;
        if w as f64 >= 5.0 * tau {
            return tau;
        }
    }
    tau
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256StarStar;

    #[test]
    fn test_lag_zero_is_one() {
        let mut acc = AutocorrAccum::new(4);
        for v in [1.0, 3.0, 2.0, 5.0, 4.0] {
            acc.push(v);
        }
        let g = acc.finish();
        assert_eq!(g.len(), 5);
        assert_abs_diff_eq!(g[0], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_series() {
        let mut acc = AutocorrAccum::new(3);
        for _ in 0..10 {
            acc.push(0.7);
        }
        assert_eq!(acc.finish(), vec![1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_white_noise_decorrelates() {
        let mut rng = Xoshiro256StarStar::seed_from_u64(3);
        let mut acc = AutocorrAccum::new(10);
        for _ in 0..50_000 {
            acc.push(rng.gen::<f64>());
        }
        let g = acc.finish();
        for &v in &g[1..] {
            assert_abs_diff_eq!(v, 0.0, epsilon = 0.03);
        }
        assert_abs_diff_eq!(sokal_tau(&g), 0.5, epsilon = 0.2);
    }

    #[test]
    fn test_ar1_tau() {
        // AR(1) with ρ: Γ(δ) = ρ^δ, τ_int = ½ + ρ/(1-ρ).
        let rho = 0.5;
        let mut rng = Xoshiro256StarStar::seed_from_u64(21);
        let mut acc = AutocorrAccum::new(30);
        let mut x = 0.0;
        for _ in 0..200_000 {
            x = rho * x + (rng.gen::<f64>() - 0.5);
            acc.push(x);
        }
        let g = acc.finish();
        assert_abs_diff_eq!(g[1], rho, epsilon = 0.02);
        assert_abs_diff_eq!(g[2], rho * rho, epsilon = 0.02);
        assert_abs_diff_eq!(sokal_tau(&g), 1.5, epsilon = 0.1);
    }
}
