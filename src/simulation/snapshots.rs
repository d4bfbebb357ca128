use std::iter::FusedIterator;

use crate::config::{ModelParams, SimConfig, SweepMode, SweepOrder};
use crate::error::Result;
use crate::geometry::Lattice;
use crate::simulation::Member;
use crate::spins::Spins;

/// Lazy sequence of lattice states for a single member: the starting
/// configuration, then the configuration after each of `n_sweeps` sweeps.
pub struct Snapshots<'a> {
    lattice: &'a Lattice,
    member: Member,
    params: ModelParams,
    mode: SweepMode,
    order: SweepOrder,
    remaining: usize,
    emitted_initial: bool,
}

/// Snapshots of member 0 of `config` (seeded with `config.seed`), so the last
/// item equals the first final state of [`run`](crate::simulation::run).
pub fn snapshots<'a>(lattice: &'a Lattice, config: &SimConfig) -> Result<Snapshots<'a>> {
    config.check()?;
    let member = Member::new(lattice, &config.params, config.seed);
    Snapshots::from_member(lattice, member, config)
}

impl<'a> Snapshots<'a> {
    /// Evolve an existing member. `config` is assumed to be checked.
    ///
    /// Fails with [`IsingError::InvalidSpins`](crate::error::IsingError::InvalidSpins)
    /// if `member` does not fit `lattice`. The member's running totals are
    /// recomputed under `config.params`.
    pub fn from_member(
        lattice: &'a Lattice,
        mut member: Member,
        config: &SimConfig,
    ) -> Result<Self> {
        member.check_fits(lattice)?;
        member.resync(lattice, &config.params);
        Ok(Self {
            lattice,
            member,
            params: config.params,
            mode: config.sweep_mode,
            order: config.sweep_order,
            remaining: config.n_sweeps,
            emitted_initial: false,
        })
    }

    /// The member in its current state.
    pub fn member(&self) -> &Member {
        &self.member
    }

    pub fn into_member(self) -> Member {
        self.member
    }
}

impl Iterator for Snapshots<'_> {
    type Item = Spins;

    fn next(&mut self) -> Option<Spins> {
        if !self.emitted_initial {
            self.emitted_initial = true;
            return Some(self.member.spins.clone());
        }
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.member
            .sweep(self.lattice, &self.params, self.mode, self.order);
        Some(self.member.spins.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining + usize::from(!self.emitted_initial);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Snapshots<'_> {}

impl FusedIterator for Snapshots<'_> {}
