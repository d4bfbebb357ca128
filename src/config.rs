use validator::{Validate, ValidationError};

use crate::error::{IsingError, Result};

/// Single-spin acceptance rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepMode {
    #[default]
    Metropolis,
    Gibbs,
}

impl TryFrom<&str> for SweepMode {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s {
            "metropolis" => Ok(Self::Metropolis),
            "gibbs" | "heat-bath" => Ok(Self::Gibbs),
            _ => Err(format!(
                "unknown sweep_mode '{s}', expected 'metropolis' or 'gibbs'"
            )),
        }
    }
}

/// Order in which one sweep visits the L² sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SweepOrder {
    /// Two independent permutations of `0..L`; rows in the first order, and
    /// within every row the columns in the second order.
    #[default]
    RowColumn,
    /// One permutation of all L² sites.
    Shuffled,
    /// Plain row-major order, no random draws for ordering.
    Sequential,
}

impl TryFrom<&str> for SweepOrder {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s {
            "row-column" | "rowcol" => Ok(Self::RowColumn),
            "shuffled" => Ok(Self::Shuffled),
            "sequential" => Ok(Self::Sequential),
            _ => Err(format!(
                "unknown sweep_order '{s}', expected 'row-column', 'shuffled', or 'sequential'"
            )),
        }
    }
}

/// Axis along which the reported mean observables are averaged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Averaging {
    /// Mean over ensemble members of their final configurations.
    #[default]
    Final,
    /// Mean over every post-warmup sweep of every ensemble member.
    History,
}

impl TryFrom<&str> for Averaging {
    type Error = String;
    fn try_from(s: &str) -> std::result::Result<Self, Self::Error> {
        match s {
            "final" | "ensemble" => Ok(Self::Final),
            "history" | "time" => Ok(Self::History),
            _ => Err(format!(
                "unknown averaging '{s}', expected 'final' or 'history'"
            )),
        }
    }
}

/// Hamiltonian and bath parameters, fixed for a whole run.
///
/// `E = -J Σ_<ij> s_i s_j - h Σ_i s_i`, sampled at thermal scale `k_b * T`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Nearest-neighbour coupling `J`.
    pub coupling: f64,
    /// External field `h`.
    pub field: f64,
    /// Boltzmann constant `k_B`.
    pub k_b: f64,
    /// Bath temperature `T`.
    pub temperature: f64,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            coupling: 1.0,
            field: 0.0,
            k_b: 1.0,
            temperature: 1.0,
        }
    }
}

impl ModelParams {
    pub fn new(temperature: f64) -> Self {
        Self {
            temperature,
            ..Self::default()
        }
    }

    pub fn with_coupling(mut self, coupling: f64) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_field(mut self, field: f64) -> Self {
        self.field = field;
        self
    }

    pub fn with_k_b(mut self, k_b: f64) -> Self {
        self.k_b = k_b;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// `k_B * T`.
    #[inline]
    pub fn thermal_scale(&self) -> f64 {
        self.k_b * self.temperature
    }

    /// `1 / (k_B * T)`.
    #[inline]
    pub fn beta(&self) -> f64 {
        1.0 / self.thermal_scale()
    }

    /// Reject non-positive or non-finite temperatures and Boltzmann scales.
    pub fn validate_temperature(&self) -> Result<()> {
        let kt = self.thermal_scale();
        let ok = self.temperature > 0.0
            && self.temperature.is_finite()
            && self.k_b > 0.0
            && self.k_b.is_finite()
            && kt.is_finite();
        if ok {
            Ok(())
        } else {
            Err(IsingError::InvalidTemperature {
                temperature: self.temperature,
            })
        }
    }
}

fn validate_sim_config(cfg: &SimConfig) -> std::result::Result<(), ValidationError> {
    if cfg.ensemble_size < 1 {
        return Err(ValidationError::new("ensemble_size must be >= 1"));
    }
    if cfg.warmup_sweeps > cfg.n_sweeps {
        return Err(ValidationError::new("warmup_sweeps must be <= n_sweeps"));
    }
    if cfg.autocorrelation_max_lag == Some(0) {
        return Err(ValidationError::new("autocorrelation_max_lag must be >= 1"));
    }
    if !cfg.params.coupling.is_finite() || !cfg.params.field.is_finite() {
        return Err(ValidationError::new("coupling and field must be finite"));
    }
    Ok(())
}

/// Everything a run needs besides the lattice side.
#[derive(Debug, Clone, Validate)]
#[validate(schema(function = "validate_sim_config"))]
pub struct SimConfig {
    pub n_sweeps: usize,
    /// Sweeps excluded from history statistics and recorded series.
    pub warmup_sweeps: usize,
    pub params: ModelParams,
    /// Members built by `run` and `scan`. `run_members` uses its slice length.
    pub ensemble_size: usize,
    /// Member `k` is seeded with `seed + k`.
    pub seed: u64,
    pub sweep_mode: SweepMode,
    pub sweep_order: SweepOrder,
    pub averaging: Averaging,
    /// Keep per-member magnetization and energy after every post-warmup sweep.
    pub record_series: bool,
    pub autocorrelation_max_lag: Option<usize>,
    /// Run ensemble members on the current thread instead of the rayon pool.
    pub sequential: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            n_sweeps: 1000,
            warmup_sweeps: 0,
            params: ModelParams::default(),
            ensemble_size: 1,
            seed: 42,
            sweep_mode: SweepMode::Metropolis,
            sweep_order: SweepOrder::RowColumn,
            averaging: Averaging::Final,
            record_series: false,
            autocorrelation_max_lag: None,
            sequential: false,
        }
    }
}

impl SimConfig {
    /// Typed temperature check first, then the cross-field rules.
    pub fn check(&self) -> Result<()> {
        self.params.validate_temperature()?;
        self.validate()
            .map_err(|e| IsingError::InvalidConfig(format!("{e}")))
    }
}
