use crate::config::{Averaging, ModelParams};
use crate::spins::Spins;
use crate::statistics::{sokal_tau, Moments};

/// Per-sweep observables of one ensemble member.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Series {
    /// Magnetization per site after each post-warmup sweep.
    pub magnetization: Vec<f64>,
    /// Energy per site after each post-warmup sweep.
    pub energy: Vec<f64>,
}

/// Observables of one run, averaged along `averaging`.
#[derive(Debug, Clone)]
pub struct SimResult {
    pub side: usize,
    pub params: ModelParams,
    /// Axis the means were taken over. `Final` when `History` was requested
    /// but no post-warmup sweep was measured.
    pub averaging: Averaging,
    /// Number of (member, sweep) samples behind the means.
    pub n_samples: usize,
    /// ⟨m⟩.
    pub magnetization: f64,
    /// ⟨|m|⟩.
    pub abs_magnetization: f64,
    /// ⟨m²⟩.
    pub magnetization2: f64,
    /// ⟨m⁴⟩.
    pub magnetization4: f64,
    /// ⟨e⟩, energy per site.
    pub energy: f64,
    /// ⟨e²⟩.
    pub energy2: f64,
    /// Final configuration of every ensemble member, in member order.
    pub final_states: Vec<Spins>,
    /// Per-member series; empty unless `record_series` was set.
    pub series: Vec<Series>,
    /// Normalized autocorrelation Γ(δ) of the ensemble-averaged m² series.
    /// Empty unless `autocorrelation_max_lag` was set.
    pub mags2_autocorrelation: Vec<f64>,
}

impl SimResult {
    pub(crate) fn from_moments(
        side: usize,
        params: ModelParams,
        averaging: Averaging,
        moments: &Moments,
    ) -> Self {
        Self {
            side,
            params,
            averaging,
            n_samples: moments.count(),
            magnetization: moments.mags.average(),
            abs_magnetization: moments.abs_mags.average(),
            magnetization2: moments.mags2.average(),
            magnetization4: moments.mags4.average(),
            energy: moments.energies.average(),
            energy2: moments.energies2.average(),
            final_states: Vec::new(),
            series: Vec::new(),
            mags2_autocorrelation: Vec::new(),
        }
    }

    fn n_spins(&self) -> f64 {
        (self.side * self.side) as f64
    }

    /// χ = N (⟨m²⟩ − ⟨|m|⟩²) / (k_B T).
    pub fn susceptibility(&self) -> f64 {
        self.n_spins() * (self.magnetization2 - self.abs_magnetization.powi(2))
            / self.params.thermal_scale()
    }

    /// c = N (⟨e²⟩ − ⟨e⟩²) / (k_B T)².
    pub fn specific_heat(&self) -> f64 {
        self.n_spins() * (self.energy2 - self.energy.powi(2))
            / self.params.thermal_scale().powi(2)
    }

    /// U₄ = 1 − ⟨m⁴⟩ / (3 ⟨m²⟩²); `None` when ⟨m²⟩ = 0.
    pub fn binder_cumulant(&self) -> Option<f64> {
        if self.magnetization2 == 0.0 {
            return None;
        }
        Some(1.0 - self.magnetization4 / (3.0 * self.magnetization2.powi(2)))
    }

    /// Integrated autocorrelation time of m², if it was collected.
    pub fn mags2_tau(&self) -> Option<f64> {
        if self.mags2_autocorrelation.is_empty() {
            None
        } else {
            Some(sokal_tau(&self.mags2_autocorrelation))
        }
    }

    /// Average results of independent runs with the same lattice and parameters.
    ///
    /// Means are weighted equally per run; final states and series are
    /// concatenated. Returns `None` for an empty slice.
    pub fn aggregate(results: &[Self]) -> Option<Self> {
        let first = results.first()?;
        let n = results.len() as f64;

        let mut agg = Self {
            side: first.side,
            params: first.params,
            averaging: first.averaging,
            n_samples: 0,
            magnetization: 0.0,
            abs_magnetization: 0.0,
            magnetization2: 0.0,
            magnetization4: 0.0,
            energy: 0.0,
            energy2: 0.0,
            final_states: Vec::new(),
            series: Vec::new(),
            mags2_autocorrelation: vec![0.0; first.mags2_autocorrelation.len()],
        };

        for r in results {
            agg.n_samples += r.n_samples;
            agg.magnetization += r.magnetization;
            agg.abs_magnetization += r.abs_magnetization;
            agg.magnetization2 += r.magnetization2;
            agg.magnetization4 += r.magnetization4;
            agg.energy += r.energy;
            agg.energy2 += r.energy2;
            agg.final_states.extend(r.final_states.iter().cloned());
            agg.series.extend(r.series.iter().cloned());
            for (a, &v) in agg
                .mags2_autocorrelation
                .iter_mut()
                .zip(r.mags2_autocorrelation.iter())
            {
                *a += v;
            }
        }

        for v in [
            &mut agg.magnetization,
            &mut agg.abs_magnetization,
            &mut agg.magnetization2,
            &mut agg.magnetization4,
            &mut agg.energy,
            &mut agg.energy2,
        ] {
            *v /= n;
        }
        for v in agg.mags2_autocorrelation.iter_mut() {
            *v /= n;
        }

        Some(agg)
    }
}
