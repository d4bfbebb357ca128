use crate::error::{IsingError, Result};

/// Number of nearest neighbours of a square-lattice site.
pub const COORDINATION: usize = 4;

/// Periodic L×L square lattice with a precomputed neighbour table.
///
/// Sites are indexed in row-major order: site `(i, j)` has flat index
/// `i * side + j`. The lattice only describes topology; spin values live in
/// [`Spins`](crate::spins::Spins) so that one lattice can be shared by every
/// member of an ensemble.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    /// Side length `L`.
    pub side: usize,
    /// Total number of sites (`L * L`).
    pub n_spins: usize,
    /// Neighbour table, length `n_spins * 4`.
    /// Layout: `neighbors[i * 4 + k]` with `k` = up, down, left, right.
    neighbors: Vec<u32>,
}

impl Lattice {
    /// Build an L×L torus. Fails with [`IsingError::InvalidDimension`] for `L == 0`
    /// or when `L * L` sites cannot be addressed by the `u32` neighbour table.
    pub fn new(side: usize) -> Result<Self> {
        let n_spins = side
            .checked_mul(side)
            .filter(|&n| n > 0 && n <= u32::MAX as usize)
            .ok_or(IsingError::InvalidDimension { side })?;
        let l = side as isize;

        let mut neighbors = vec![0u32; n_spins * COORDINATION];
        for i in 0..side {
            for j in 0..side {
                let site = i * side + j;
                let offsets = [(-1isize, 0isize), (1, 0), (0, -1), (0, 1)];
                for (k, (di, dj)) in offsets.into_iter().enumerate() {
                    let ni = (i as isize + di).rem_euclid(l) as usize;
                    let nj = (j as isize + dj).rem_euclid(l) as usize;
                    neighbors[site * COORDINATION + k] = (ni * side + nj) as u32;
                }
            }
        }

        Ok(Self {
            side,
            n_spins,
            neighbors,
        })
    }

    /// Flat index of site `(i, j)`.
    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        debug_assert!(i < self.side && j < self.side);
        i * self.side + j
    }

    /// Row and column of flat index `site`.
    #[inline]
    pub fn coords(&self, site: usize) -> (usize, usize) {
        (site / self.side, site % self.side)
    }

    /// The four periodic neighbours of `(i, j)`:
    /// `(i-1, j)`, `(i+1, j)`, `(i, j-1)`, `(i, j+1)`, all taken mod `L`.
    pub fn neighbors(&self, i: usize, j: usize) -> [(usize, usize); COORDINATION] {
        let site = self.index(i, j);
        let mut out = [(0, 0); COORDINATION];
        for (k, slot) in out.iter_mut().enumerate() {
            *slot = self.coords(self.neighbor(site, k));
        }
        out
    }

    /// Flat index of neighbour `k` (0 = up, 1 = down, 2 = left, 3 = right) of `site`.
    #[inline]
    pub fn neighbor(&self, site: usize, k: usize) -> usize {
        self.neighbors[site * COORDINATION + k] as usize
    }

    /// Flat indices of all four neighbours of `site`.
    #[inline]
    pub fn neighbor_sites(&self, site: usize) -> &[u32] {
        &self.neighbors[site * COORDINATION..(site + 1) * COORDINATION]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_side_rejected() {
        assert_eq!(
            Lattice::new(0).unwrap_err(),
            IsingError::InvalidDimension { side: 0 }
        );
    }

    #[test]
    fn test_oversize_side_rejected() {
        for side in [usize::MAX, 65_536, 70_000] {
            assert_eq!(
                Lattice::new(side).unwrap_err(),
                IsingError::InvalidDimension { side }
            );
        }
    }

    #[test]
    fn test_corner_neighbors_wrap() {
        let lat = Lattice::new(4).unwrap();
        assert_eq!(lat.n_spins, 16);

        let nbrs = lat.neighbors(0, 0);
        for expected in [(3, 0), (1, 0), (0, 3), (0, 1)] {
            assert!(nbrs.contains(&expected), "missing {expected:?} in {nbrs:?}");
        }
        assert_eq!(nbrs, [(3, 0), (1, 0), (0, 3), (0, 1)]);
    }

    #[test]
    fn test_opposite_corner_and_edges() {
        let lat = Lattice::new(4).unwrap();
        assert_eq!(lat.neighbors(3, 3), [(2, 3), (0, 3), (3, 2), (3, 0)]);
        assert_eq!(lat.neighbors(0, 2), [(3, 2), (1, 2), (0, 1), (0, 3)]);
        assert_eq!(lat.neighbors(2, 1), [(1, 1), (3, 1), (2, 0), (2, 2)]);
    }

    #[test]
    fn test_flat_table_matches_coordinates() {
        let lat = Lattice::new(5).unwrap();
        for site in 0..lat.n_spins {
            let (i, j) = lat.coords(site);
            assert_eq!(lat.index(i, j), site);
            let from_coords: Vec<usize> = lat
                .neighbors(i, j)
                .iter()
                .map(|&(a, b)| lat.index(a, b))
                .collect();
            let from_table: Vec<usize> =
                lat.neighbor_sites(site).iter().map(|&n| n as usize).collect();
            assert_eq!(from_coords, from_table);
        }
    }

    #[test]
    fn test_single_site_is_its_own_neighbor() {
        let lat = Lattice::new(1).unwrap();
        assert_eq!(lat.neighbors(0, 0), [(0, 0); 4]);
    }

    #[test]
    fn test_two_by_two_neighbors_repeat() {
        // On L=2 the up and down neighbours coincide, as do left and right.
        let lat = Lattice::new(2).unwrap();
        assert_eq!(lat.neighbors(0, 0), [(1, 0), (1, 0), (0, 1), (0, 1)]);
    }
}
