use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::{ModelParams, SweepMode, SweepOrder};
use crate::error::{IsingError, Result};
use crate::geometry::Lattice;
use crate::mcmc::{self, SweepDelta};
use crate::spins::{self, Spins};

/// One ensemble member: a spin configuration, its own PRNG stream, and
/// running totals of Σ s and E kept up to date by every sweep.
#[derive(Debug, Clone)]
pub struct Member {
    pub spins: Spins,
    pub rng: Xoshiro256StarStar,
    spin_sum: i64,
    energy: f64,
    /// Sweeps applied since construction or the last reset.
    pub sweeps_done: usize,
}

impl Member {
    /// Random ±1 start drawn from a PRNG seeded with `seed`.
    pub fn new(lattice: &Lattice, params: &ModelParams, seed: u64) -> Self {
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
        let spins = Spins::random(lattice, &mut rng);
        Self::with_rng(lattice, params, spins, rng)
    }

    /// Start from a given configuration; the PRNG is seeded with `seed`.
    ///
    /// Fails with [`IsingError::InvalidSpins`] if `spins` was not built for `lattice`.
    pub fn from_spins(
        lattice: &Lattice,
        params: &ModelParams,
        spins: Spins,
        seed: u64,
    ) -> Result<Self> {
        check_side(lattice, &spins)?;
        Ok(Self::with_rng(
            lattice,
            params,
            spins,
            Xoshiro256StarStar::seed_from_u64(seed),
        ))
    }

    /// Reject a member whose configuration has a different side than `lattice`.
    pub fn check_fits(&self, lattice: &Lattice) -> Result<()> {
        check_side(lattice, &self.spins)
    }

    fn with_rng(
        lattice: &Lattice,
        params: &ModelParams,
        spins: Spins,
        rng: Xoshiro256StarStar,
    ) -> Self {
        let spin_sum = spins.sum();
        let energy = spins::total_energy(lattice, &spins, params);
        Self {
            spins,
            rng,
            spin_sum,
            energy,
            sweeps_done: 0,
        }
    }

    /// One Monte Carlo step, folding the sweep's delta into the running totals.
    pub fn sweep(
        &mut self,
        lattice: &Lattice,
        params: &ModelParams,
        mode: SweepMode,
        order: SweepOrder,
    ) -> SweepDelta {
        let delta = mcmc::sweep(lattice, &mut self.spins, params, mode, order, &mut self.rng);
        self.spin_sum += delta.spin_sum;
        self.energy += delta.energy;
        self.sweeps_done += 1;
        delta
    }

    /// Magnetization per site from the running total.
    #[inline]
    pub fn magnetization(&self) -> f64 {
        self.spin_sum as f64 / self.spins.len() as f64
    }

    /// Energy per site from the running total.
    #[inline]
    pub fn energy(&self) -> f64 {
        self.energy / self.spins.len() as f64
    }

    /// Recompute the running totals from scratch, discarding accumulated rounding.
    pub fn resync(&mut self, lattice: &Lattice, params: &ModelParams) {
        self.spin_sum = self.spins.sum();
        self.energy = spins::total_energy(lattice, &self.spins, params);
    }

    /// Re-seed and re-randomize, as if freshly constructed with `seed`.
    pub fn reset(&mut self, lattice: &Lattice, params: &ModelParams, seed: u64) {
        *self = Self::new(lattice, params, seed);
    }
}

fn check_side(lattice: &Lattice, spins: &Spins) -> Result<()> {
    if spins.side() != lattice.side {
        return Err(IsingError::InvalidSpins(format!(
            "configuration is {0}x{0} but the lattice is {1}x{1}",
            spins.side(),
            lattice.side
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_running_totals_match_recomputation() {
        let lat = Lattice::new(16).unwrap();
        let params = ModelParams::new(2.27).with_field(0.1);
        let mut member = Member::new(&lat, &params, 5);
        for _ in 0..100 {
            member.sweep(&lat, &params, SweepMode::Metropolis, SweepOrder::RowColumn);
            assert_eq!(
                member.magnetization(),
                spins::magnetization_per_site(&member.spins)
            );
            assert_relative_eq!(
                member.energy(),
                spins::energy_per_site(&lat, &member.spins, &params),
                epsilon = 1e-10
            );
        }
        assert_eq!(member.sweeps_done, 100);
    }

    #[test]
    fn test_reset_reproduces_initial_state() {
        let lat = Lattice::new(8).unwrap();
        let params = ModelParams::new(1.5);
        let fresh = Member::new(&lat, &params, 77);
        let mut member = fresh.clone();
        for _ in 0..5 {
            member.sweep(&lat, &params, SweepMode::Gibbs, SweepOrder::Shuffled);
        }
        member.reset(&lat, &params, 77);
        assert_eq!(member.spins, fresh.spins);
        assert_eq!(member.sweeps_done, 0);
        assert_eq!(member.magnetization(), fresh.magnetization());
    }

    #[test]
    fn test_resync_is_noop_on_consistent_totals() {
        let lat = Lattice::new(4).unwrap();
        let params = ModelParams::default();
        let spins = Spins::aligned(&lat, -1).unwrap();
        let mut member = Member::from_spins(&lat, &params, spins, 0).unwrap();
        assert_eq!(member.energy(), -2.0);
        member.resync(&lat, &params);
        assert_eq!(member.energy(), -2.0);
        assert_eq!(member.magnetization(), -1.0);
    }

    #[test]
    fn test_from_spins_rejects_other_lattice_size() {
        let small = Lattice::new(2).unwrap();
        let big = Lattice::new(4).unwrap();
        let params = ModelParams::default();
        let spins = Spins::aligned(&small, 1).unwrap();
        assert!(matches!(
            Member::from_spins(&big, &params, spins, 0),
            Err(IsingError::InvalidSpins(_))
        ));
        let member = Member::new(&small, &params, 1);
        assert!(member.check_fits(&small).is_ok());
        assert!(member.check_fits(&big).is_err());
    }
}
