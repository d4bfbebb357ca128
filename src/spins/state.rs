use rand::Rng;

use crate::error::{IsingError, Result};
use crate::geometry::Lattice;

/// Spin values of one L×L configuration, each +1 or −1, row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Spins {
    side: usize,
    values: Vec<i8>,
}

impl Spins {
    /// Each site independently ±1 with probability ½.
    pub fn random<R: Rng + ?Sized>(lattice: &Lattice, rng: &mut R) -> Self {
        let values = (0..lattice.n_spins)
            .map(|_| if rng.gen::<f64>() < 0.5 { -1 } else { 1 })
            .collect();
        Self {
            side: lattice.side,
            values,
        }
    }

    /// Every site set to `value` (+1 or −1).
    pub fn aligned(lattice: &Lattice, value: i8) -> Result<Self> {
        check_spin(value)?;
        Ok(Self {
            side: lattice.side,
            values: vec![value; lattice.n_spins],
        })
    }

    /// Wrap a row-major vector of ±1 values.
    pub fn from_vec(lattice: &Lattice, values: Vec<i8>) -> Result<Self> {
        if values.len() != lattice.n_spins {
            return Err(IsingError::InvalidSpins(format!(
                "expected {} values for a {}x{} lattice, got {}",
                lattice.n_spins,
                lattice.side,
                lattice.side,
                values.len()
            )));
        }
        for &v in &values {
            check_spin(v)?;
        }
        Ok(Self {
            side: lattice.side,
            values,
        })
    }

    #[inline]
    pub fn side(&self) -> usize {
        self.side
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> i8 {
        self.values[i * self.side + j]
    }

    #[inline]
    pub fn at(&self, site: usize) -> i8 {
        self.values[site]
    }

    /// Negate the spin at `(i, j)`.
    #[inline]
    pub fn flip(&mut self, i: usize, j: usize) {
        self.flip_site(i * self.side + j);
    }

    /// Negate the spin at flat index `site`.
    #[inline]
    pub fn flip_site(&mut self, site: usize) {
        self.values[site] = -self.values[site];
    }

    #[inline]
    pub fn as_slice(&self) -> &[i8] {
        &self.values
    }

    /// Σ s over all sites.
    pub fn sum(&self) -> i64 {
        self.values.iter().map(|&s| s as i64).sum()
    }

    /// Copy out as `L` rows of `L` values, e.g. for rendering.
    pub fn to_rows(&self) -> Vec<Vec<i8>> {
        self.values
            .chunks(self.side)
            .map(|row| row.to_vec())
            .collect()
    }
}

fn check_spin(v: i8) -> Result<()> {
    if v == 1 || v == -1 {
        Ok(())
    } else {
        Err(IsingError::InvalidSpins(format!(
            "spin value {v} is not +1 or -1"
        )))
    }
}
