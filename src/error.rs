//! Error types for ising-mc.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum IsingError {
    #[error("invalid lattice side {side}, expected L >= 1")]
    InvalidDimension { side: usize },

    #[error("invalid thermal scale k_B*T = {temperature}, expected a finite positive value")]
    InvalidTemperature { temperature: f64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid spin configuration: {0}")]
    InvalidSpins(String),
}

pub type Result<T> = std::result::Result<T, IsingError>;
