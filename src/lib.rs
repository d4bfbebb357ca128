//! Metropolis Monte Carlo for the 2D Ising model on a periodic square lattice.
//!
//! ```no_run
//! use ising_mc::{run, ModelParams, SimConfig};
//!
//! let config = SimConfig {
//!     n_sweeps: 500,
//!     params: ModelParams::new(2.0),
//!     ensemble_size: 8,
//!     ..SimConfig::default()
//! };
//! let result = run(32, &config)?;
//! println!("<m> = {:.3}, <e> = {:.3}", result.magnetization, result.energy);
//! # Ok::<(), ising_mc::IsingError>(())
//! ```

pub mod config;
pub mod error;
pub mod geometry;
pub mod mcmc;
pub mod simulation;
pub mod spins;
pub mod statistics;

mod parallel;

pub use config::{Averaging, ModelParams, SimConfig, SweepMode, SweepOrder};
pub use error::{IsingError, Result};
pub use geometry::Lattice;
pub use mcmc::{metropolis_sweep, sweep, SweepDelta};
pub use simulation::{
    run, run_members, run_sweep_loop, run_with_progress, scan, snapshots, Member, Snapshots,
};
pub use spins::{energy_per_site, magnetization_per_site, Spins};
pub use statistics::{Series, SimResult};
