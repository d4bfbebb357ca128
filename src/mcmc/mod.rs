pub mod metropolis;
pub mod sweep;

pub use metropolis::{delta_energy, gibbs_accept, metropolis_accept};
pub use sweep::{metropolis_sweep, sweep, SweepDelta};
