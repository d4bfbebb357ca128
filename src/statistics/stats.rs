/// Running mean of `value^power`.
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub aggregate: f64,
    pub power: u32,
}

impl Statistics {
    pub fn new(power: u32) -> Self {
        Self {
            count: 0,
            aggregate: 0.0,
            power,
        }
    }

    pub fn update(&mut self, value: f64) {
        self.count += 1;
        self.aggregate += if self.power == 1 {
            value
        } else {
            value.powi(self.power as i32)
        };
    }

    /// Fold another accumulator with the same power into this one.
    pub fn merge(&mut self, other: &Self) {
        debug_assert_eq!(self.power, other.power);
        self.count += other.count;
        self.aggregate += other.aggregate;
    }

    pub fn average(&self) -> f64 {
        if self.count == 0 {
            return self.aggregate;
        }
        self.aggregate / self.count as f64
    }
}

/// Moment accumulators for magnetization and energy per site.
#[derive(Debug, Clone, PartialEq)]
pub struct Moments {
    pub mags: Statistics,
    pub abs_mags: Statistics,
    pub mags2: Statistics,
    pub mags4: Statistics,
    pub energies: Statistics,
    pub energies2: Statistics,
}

impl Default for Moments {
    fn default() -> Self {
        Self {
            mags: Statistics::new(1),
            abs_mags: Statistics::new(1),
            mags2: Statistics::new(2),
            mags4: Statistics::new(4),
            energies: Statistics::new(1),
            energies2: Statistics::new(2),
        }
    }
}

impl Moments {
    pub fn update(&mut self, mag: f64, energy: f64) {
        self.mags.update(mag);
        self.abs_mags.update(mag.abs());
        self.mags2.update(mag);
        self.mags4.update(mag);
        self.energies.update(energy);
        self.energies2.update(energy);
    }

    pub fn merge(&mut self, other: &Self) {
        self.mags.merge(&other.mags);
        self.abs_mags.merge(&other.abs_mags);
        self.mags2.merge(&other.mags2);
        self.mags4.merge(&other.mags4);
        self.energies.merge(&other.energies);
        self.energies2.merge(&other.energies2);
    }

    pub fn count(&self) -> usize {
        self.mags.count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_powers() {
        let mut s1 = Statistics::new(1);
        let mut s2 = Statistics::new(2);
        for v in [1.0, -2.0, 3.0] {
            s1.update(v);
            s2.update(v);
        }
        assert_relative_eq!(s1.average(), 2.0 / 3.0);
        assert_relative_eq!(s2.average(), 14.0 / 3.0);
    }

    #[test]
    fn test_empty_average_is_zero() {
        assert_eq!(Statistics::new(2).average(), 0.0);
    }

    #[test]
    fn test_merge_matches_single_stream() {
        let mut a = Moments::default();
        let mut b = Moments::default();
        let mut all = Moments::default();
        for (k, (m, e)) in [(0.5, -1.0), (-0.25, -1.5), (1.0, -2.0), (0.0, 0.5)]
            .into_iter()
            .enumerate()
        {
            if k % 2 == 0 {
                a.update(m, e);
            } else {
                b.update(m, e);
            }
            all.update(m, e);
        }
        a.merge(&b);
        assert_eq!(a.count(), 4);
        assert_relative_eq!(a.mags4.average(), all.mags4.average());
        assert_relative_eq!(a.abs_mags.average(), all.abs_mags.average());
        assert_relative_eq!(a.energies2.average(), all.energies2.average());
    }
}
