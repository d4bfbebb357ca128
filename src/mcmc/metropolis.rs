use rand::Rng;

use crate::config::ModelParams;

/// Energy cost of flipping a spin `spin` whose neighbours sum to `nbr_sum`:
/// `ΔE = 2 s (J Σ_nbr + h)`.
#[inline]
pub fn delta_energy(spin: i8, nbr_sum: i32, params: &ModelParams) -> f64 {
    2.0 * spin as f64 * (params.coupling * nbr_sum as f64 + params.field)
}

/// Metropolis criterion at thermal scale `kt = k_B T`.
///
/// Moves with `ΔE <= 0` are accepted without consuming a random draw;
/// otherwise one `u ~ U[0, 1)` is drawn and the move is accepted iff
/// `u < exp(-ΔE / kt)`.
#[inline]
pub fn metropolis_accept<R: Rng + ?Sized>(delta: f64, kt: f64, rng: &mut R) -> bool {
    if delta <= 0.0 {
        return true;
    }
    rng.gen::<f64>() < (-delta / kt).exp()
}

/// Heat-bath criterion: accept with probability `1 / (1 + exp(ΔE / kt))`.
/// Always consumes one draw.
#[inline]
pub fn gibbs_accept<R: Rng + ?Sized>(delta: f64, kt: f64, rng: &mut R) -> bool {
    let p = 1.0 / (1.0 + (delta / kt).exp());
    rng.gen::<f64>() < p
}
