pub mod member;
pub mod snapshots;

pub use member::Member;
pub use snapshots::{snapshots, Snapshots};

use log::{debug, trace};

use crate::config::{Averaging, SimConfig};
use crate::error::{IsingError, Result};
use crate::geometry::Lattice;
use crate::parallel::par_map_mut;
use crate::spins;
use crate::statistics::{AutocorrAccum, Moments, Series, SimResult};

/// What one member's sweep loop produced.
pub struct MemberRun {
    /// Post-warmup moments from the running totals.
    pub moments: Moments,
    /// Per-sweep observables, when `record_series` is set.
    pub series: Option<Series>,
    /// m² after each post-warmup sweep, when autocorrelation is requested.
    pub mags2_trace: Vec<f64>,
}

/// Run `config.n_sweeps` Monte Carlo steps on one [`Member`].
///
/// Each sweep is a full single-spin pass (`sweep_mode`, in `sweep_order`).
/// After `warmup_sweeps`, the member's running magnetization and energy are
/// recorded. `on_sweep` is called once per sweep (useful for progress bars).
///
/// `config` is assumed to have passed [`SimConfig::check`] and `member` to
/// fit `lattice`.
pub fn run_sweep_loop(
    lattice: &Lattice,
    member: &mut Member,
    config: &SimConfig,
    on_sweep: &(dyn Fn() + Sync),
) -> MemberRun {
    let params = &config.params;
    // The totals may have been computed under other couplings.
    member.resync(lattice, params);
    let n_measured = config.n_sweeps.saturating_sub(config.warmup_sweeps);
    let collect_ac = config.autocorrelation_max_lag.is_some();

    let mut moments = Moments::default();
    let mut series = config.record_series.then(|| Series {
        magnetization: Vec::with_capacity(n_measured),
        energy: Vec::with_capacity(n_measured),
    });
    let mut mags2_trace = Vec::with_capacity(if collect_ac { n_measured } else { 0 });

    for sweep_id in 0..config.n_sweeps {
        on_sweep();
        let delta = member.sweep(lattice, params, config.sweep_mode, config.sweep_order);
        trace!("sweep {sweep_id}: {} flips", delta.flips);

        if sweep_id < config.warmup_sweeps {
            continue;
        }
        let mag = member.magnetization();
        let energy = member.energy();
        moments.update(mag, energy);
        if let Some(ref mut s) = series {
            s.magnetization.push(mag);
            s.energy.push(energy);
        }
        if collect_ac {
            mags2_trace.push(mag * mag);
        }
    }

    // Drop accumulated rounding before the final state is read back.
    member.resync(lattice, params);

    MemberRun {
        moments,
        series,
        mags2_trace,
    }
}

/// Build `config.ensemble_size` members; member `k` is seeded with `seed + k`.
pub fn init_members(lattice: &Lattice, config: &SimConfig) -> Vec<Member> {
    (0..config.ensemble_size)
        .map(|k| Member::new(lattice, &config.params, config.seed.wrapping_add(k as u64)))
        .collect()
}

/// Simulate an L×L lattice under `config`.
///
/// Fails fast with [`IsingError::InvalidDimension`] for `L == 0` and with
/// [`IsingError::InvalidTemperature`] for a non-positive thermal scale, before
/// anything is allocated.
pub fn run(side: usize, config: &SimConfig) -> Result<SimResult> {
    run_with_progress(side, config, &|| {})
}

/// [`run`] with a callback invoked once per sweep of every member.
pub fn run_with_progress(
    side: usize,
    config: &SimConfig,
    on_sweep: &(dyn Fn() + Sync),
) -> Result<SimResult> {
    if side == 0 {
        return Err(IsingError::InvalidDimension { side });
    }
    config.check()?;
    let lattice = Lattice::new(side)?;
    let mut members = init_members(&lattice, config);
    Ok(sweep_members(&lattice, &mut members, config, on_sweep))
}

/// Sweep caller-owned members (in parallel unless `config.sequential`) and
/// reduce their observables along `config.averaging`.
///
/// The ensemble is `members`; `config.ensemble_size` is replaced by
/// `members.len()` before validation, so an empty slice is rejected with
/// [`IsingError::InvalidConfig`]. A member whose side differs from `lattice`
/// is rejected with [`IsingError::InvalidSpins`].
///
/// With [`Averaging::History`] and no post-warmup sweeps, the means fall back
/// to the final states and the result reports [`Averaging::Final`].
pub fn run_members(
    lattice: &Lattice,
    members: &mut [Member],
    config: &SimConfig,
    on_sweep: &(dyn Fn() + Sync),
) -> Result<SimResult> {
    SimConfig {
        ensemble_size: members.len(),
        ..config.clone()
    }
    .check()?;
    for member in members.iter() {
        member.check_fits(lattice)?;
    }
    Ok(sweep_members(lattice, members, config, on_sweep))
}

/// `config` checked, `members` non-empty and sized for `lattice`.
fn sweep_members(
    lattice: &Lattice,
    members: &mut [Member],
    config: &SimConfig,
    on_sweep: &(dyn Fn() + Sync),
) -> SimResult {
    debug!(
        "running {} member(s) on {}x{} for {} sweeps (warmup {}), kT = {}, J = {}, h = {}",
        members.len(),
        lattice.side,
        lattice.side,
        config.n_sweeps,
        config.warmup_sweeps,
        config.params.thermal_scale(),
        config.params.coupling,
        config.params.field,
    );

    let runs = par_map_mut(members, config.sequential, |member, idx| {
        let run = run_sweep_loop(lattice, member, config, on_sweep);
        trace!("member {idx} done, m = {:.4}", member.magnetization());
        run
    });

    let n_measured = config.n_sweeps.saturating_sub(config.warmup_sweeps);
    let use_history = config.averaging == Averaging::History && n_measured > 0;
    let averaging = if use_history {
        Averaging::History
    } else {
        Averaging::Final
    };

    let mut moments = Moments::default();
    let mut series = Vec::new();
    let mut traces = Vec::new();
    for run in runs {
        if use_history {
            moments.merge(&run.moments);
        }
        series.extend(run.series);
        traces.push(run.mags2_trace);
    }
    if !use_history {
        for member in members.iter() {
            moments.update(
                spins::magnetization_per_site(&member.spins),
                spins::energy_per_site(lattice, &member.spins, &config.params),
            );
        }
    }

    let mut result =
        SimResult::from_moments(lattice.side, config.params, averaging, &moments);
    result.final_states = members.iter().map(|m| m.spins.clone()).collect();
    result.series = series;

    if let Some(max_lag) = config.autocorrelation_max_lag {
        if n_measured > 0 {
            let lag = max_lag.min(n_measured / 4).max(1);
            let mut acc = AutocorrAccum::new(lag);
            let inv = 1.0 / traces.len() as f64;
            for t in 0..n_measured {
                acc.push(traces.iter().map(|tr| tr[t]).sum::<f64>() * inv);
            }
            result.mags2_autocorrelation = acc.finish();
        }
    }

    debug!(
        "done: <m> = {:.6}, <e> = {:.6} over {} sample(s)",
        result.magnetization, result.energy, result.n_samples
    );
    result
}

/// One independent run per temperature, sharing every other setting.
///
/// Temperatures run in parallel unless `config.sequential`. Every run uses the
/// same base seed. Results come back in input order.
pub fn scan(side: usize, temperatures: &[f64], config: &SimConfig) -> Result<Vec<(f64, SimResult)>> {
    if side == 0 {
        return Err(IsingError::InvalidDimension { side });
    }
    let mut configs: Vec<SimConfig> = temperatures
        .iter()
        .map(|&t| SimConfig {
            params: config.params.with_temperature(t),
            ..config.clone()
        })
        .collect();
    for c in &configs {
        c.check()?;
    }
    let lattice = Lattice::new(side)?;

    debug!("scanning {} temperature(s) on {side}x{side}", configs.len());
    Ok(par_map_mut(&mut configs, config.sequential, |c, _| {
        let mut members = init_members(&lattice, c);
        (c.params.temperature, sweep_members(&lattice, &mut members, c, &|| {}))
    }))
}
