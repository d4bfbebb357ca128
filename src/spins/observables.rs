use crate::config::ModelParams;
use crate::geometry::Lattice;
use crate::spins::Spins;

/// Sum of the four neighbour spins of `site`.
#[inline]
pub fn neighbor_sum(lattice: &Lattice, spins: &Spins, site: usize) -> i32 {
    lattice
        .neighbor_sites(site)
        .iter()
        .map(|&n| spins.at(n as usize) as i32)
        .sum()
}

/// Mean spin, in [-1, 1].
pub fn magnetization_per_site(spins: &Spins) -> f64 {
    spins.sum() as f64 / spins.len() as f64
}

/// Total energy `E = -J Σ_<ij> s_i s_j - h Σ_i s_i`.
///
/// Each undirected bond is visited once through the forward (down, right)
/// neighbours of every site.
pub fn total_energy(lattice: &Lattice, spins: &Spins, params: &ModelParams) -> f64 {
    let mut bonds = 0i64;
    let mut magnet = 0i64;
    for site in 0..lattice.n_spins {
        let si = spins.at(site) as i64;
        let down = spins.at(lattice.neighbor(site, 1)) as i64;
        let right = spins.at(lattice.neighbor(site, 3)) as i64;
        bonds += si * (down + right);
        magnet += si;
    }
    -params.coupling * bonds as f64 - params.field * magnet as f64
}

/// Energy per site. For `J = 1`, `h = 0` this lies in [-2, 2], with -2 for a
/// fully aligned lattice.
pub fn energy_per_site(lattice: &Lattice, spins: &Spins, params: &ModelParams) -> f64 {
    total_energy(lattice, spins, params) / lattice.n_spins as f64
}
