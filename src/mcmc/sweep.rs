use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::{ModelParams, SweepMode, SweepOrder};
use crate::geometry::Lattice;
use crate::mcmc::metropolis::{delta_energy, gibbs_accept, metropolis_accept};
use crate::spins::{neighbor_sum, Spins};

/// Accumulated effect of one sweep, for incremental observable tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepDelta {
    /// Accepted flips.
    pub flips: usize,
    /// Change of Σ s.
    pub spin_sum: i64,
    /// Change of the total energy.
    pub energy: f64,
}

/// Attempt a flip at `site`, accumulating into `delta` when accepted.
#[inline]
fn update_site<R: Rng + ?Sized>(
    lattice: &Lattice,
    spins: &mut Spins,
    params: &ModelParams,
    site: usize,
    rng: &mut R,
    accept_fn: &impl Fn(&mut R, f64) -> bool,
    delta: &mut SweepDelta,
) {
    let si = spins.at(site);
    let eng_change = delta_energy(si, neighbor_sum(lattice, spins, site), params);
    if accept_fn(rng, eng_change) {
        spins.flip_site(site);
        delta.flips += 1;
        delta.spin_sum -= 2 * si as i64;
        delta.energy += eng_change;
    }
}

/// Single-spin-flip sweep with a generic acceptance rule.
///
/// `accept_fn(rng, eng_change)` decides whether to apply a flip costing
/// `eng_change`. Every site is visited exactly once, in the order given by
/// `order`.
fn sweep_generic<R: Rng + ?Sized>(
    lattice: &Lattice,
    spins: &mut Spins,
    params: &ModelParams,
    order: SweepOrder,
    rng: &mut R,
    accept_fn: impl Fn(&mut R, f64) -> bool,
) -> SweepDelta {
    let side = lattice.side;
    let mut delta = SweepDelta::default();

    match order {
        SweepOrder::RowColumn => {
            let mut rows: Vec<usize> = (0..side).collect();
            let mut cols: Vec<usize> = (0..side).collect();
            rows.shuffle(rng);
            cols.shuffle(rng);
            for &i in &rows {
                for &j in &cols {
                    let site = lattice.index(i, j);
                    update_site(lattice, spins, params, site, rng, &accept_fn, &mut delta);
                }
            }
        }
        SweepOrder::Shuffled => {
            let mut sites: Vec<usize> = (0..lattice.n_spins).collect();
            sites.shuffle(rng);
            for &site in &sites {
                update_site(lattice, spins, params, site, rng, &accept_fn, &mut delta);
            }
        }
        SweepOrder::Sequential => {
            for site in 0..lattice.n_spins {
                update_site(lattice, spins, params, site, rng, &accept_fn, &mut delta);
            }
        }
    }

    delta
}

/// One Monte Carlo step: every site offered one flip under `mode`.
///
/// `params` must carry a positive thermal scale; callers validate it once per
/// run rather than per sweep.
pub fn sweep<R: Rng + ?Sized>(
    lattice: &Lattice,
    spins: &mut Spins,
    params: &ModelParams,
    mode: SweepMode,
    order: SweepOrder,
    rng: &mut R,
) -> SweepDelta {
    let kt = params.thermal_scale();
    match mode {
        SweepMode::Metropolis => sweep_generic(lattice, spins, params, order, rng, |rng, d| {
            metropolis_accept(d, kt, rng)
        }),
        SweepMode::Gibbs => sweep_generic(lattice, spins, params, order, rng, |rng, d| {
            gibbs_accept(d, kt, rng)
        }),
    }
}

/// Metropolis sweep in row/column permutation order.
#[inline]
pub fn metropolis_sweep<R: Rng + ?Sized>(
    lattice: &Lattice,
    spins: &mut Spins,
    params: &ModelParams,
    rng: &mut R,
) -> SweepDelta {
    sweep(
        lattice,
        spins,
        params,
        SweepMode::Metropolis,
        SweepOrder::RowColumn,
        rng,
    )
}
