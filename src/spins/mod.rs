pub mod observables;
pub mod state;

pub use observables::{energy_per_site, magnetization_per_site, neighbor_sum, total_energy};
pub use state::Spins;
