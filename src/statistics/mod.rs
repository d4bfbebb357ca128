pub mod autocorrelation;
pub mod results;
mod stats;

pub use autocorrelation::{sokal_tau, AutocorrAccum};
pub use results::{Series, SimResult};
pub use stats::{Moments, Statistics};
