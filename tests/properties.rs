use approx::assert_relative_eq;
use ising_mc::{
    energy_per_site, magnetization_per_site, metropolis_sweep, run, run_members, snapshots,
    Averaging, IsingError, Lattice, Member, ModelParams, SimConfig, Spins, SweepMode, SweepOrder,
};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

fn config(n_sweeps: usize, temperature: f64) -> SimConfig {
    SimConfig {
        n_sweeps,
        params: ModelParams::new(temperature),
        ..SimConfig::default()
    }
}

#[test]
fn identical_seeds_give_identical_runs() {
    for seed in [0u64, 1, 42, u64::MAX] {
        for order in [SweepOrder::RowColumn, SweepOrder::Shuffled] {
            let cfg = SimConfig {
                seed,
                sweep_order: order,
                ensemble_size: 2,
                ..config(25, 2.269)
            };
            let a = run(9, &cfg).unwrap();
            let b = run(9, &cfg).unwrap();
            assert_eq!(a.final_states, b.final_states);
        }
    }
}

#[test]
fn periodic_neighbors_of_origin() {
    let lattice = Lattice::new(4).unwrap();
    let nbrs = lattice.neighbors(0, 0);
    for site in [(3, 0), (1, 0), (0, 3), (0, 1)] {
        assert!(nbrs.contains(&site));
    }
}

#[test]
fn observables_stay_in_bounds_during_evolution() {
    let params = ModelParams::new(2.0);
    for side in [2, 3, 7, 16] {
        let lattice = Lattice::new(side).unwrap();
        let mut rng = Xoshiro256StarStar::seed_from_u64(side as u64);
        let mut spins = Spins::random(&lattice, &mut rng);
        for _ in 0..30 {
            metropolis_sweep(&lattice, &mut spins, &params, &mut rng);
            let e = energy_per_site(&lattice, &spins, &params);
            let m = magnetization_per_site(&spins);
            assert!((-2.0..=2.0).contains(&e));
            assert!((-1.0..=1.0).contains(&m));
        }
    }
}

#[test]
fn two_by_two_without_sweeps() {
    let lattice = Lattice::new(2).unwrap();
    let cfg = SimConfig {
        seed: 2024,
        ..config(0, 1.0)
    };
    let result = run(2, &cfg).unwrap();
    let initial = Member::new(&lattice, &cfg.params, 2024).spins;
    assert_eq!(result.final_states[0], initial);
    assert_eq!(result.magnetization, magnetization_per_site(&initial));
    assert_eq!(result.energy, energy_per_site(&lattice, &initial, &cfg.params));

    let states: Vec<Spins> = snapshots(&lattice, &cfg).unwrap().collect();
    assert_eq!(states, vec![initial]);
}

#[test]
fn zero_temperature_limit_keeps_aligned_state() {
    let lattice = Lattice::new(12).unwrap();
    let cfg = SimConfig {
        averaging: Averaging::History,
        ..config(100, 1e-4)
    };
    let up = Spins::aligned(&lattice, 1).unwrap();
    let mut members = vec![Member::from_spins(&lattice, &cfg.params, up.clone(), 7).unwrap()];
    let result = run_members(&lattice, &mut members, &cfg, &|| {}).unwrap();
    assert_eq!(result.final_states[0], up);
    assert_relative_eq!(result.magnetization, 1.0);
}

#[test]
fn heat_bath_agrees_with_metropolis_in_the_ordered_phase() {
    let lattice = Lattice::new(12).unwrap();
    let up = Spins::aligned(&lattice, 1).unwrap();
    let mut energies = Vec::new();
    for mode in [SweepMode::Metropolis, SweepMode::Gibbs] {
        let cfg = SimConfig {
            sweep_mode: mode,
            warmup_sweeps: 200,
            averaging: Averaging::History,
            ..config(1200, 1.8)
        };
        let mut members: Vec<Member> = (0..4)
            .map(|k| Member::from_spins(&lattice, &cfg.params, up.clone(), k).unwrap())
            .collect();
        energies.push(run_members(&lattice, &mut members, &cfg, &|| {}).unwrap().energy);
    }
    // Onsager at T = 1.8: e ≈ -1.86.
    assert_relative_eq!(energies[0], energies[1], epsilon = 0.03);
    assert!(energies[0] < -1.8 && energies[0] > -1.95);
}

#[test]
fn invalid_inputs() {
    assert!(matches!(
        Lattice::new(0),
        Err(IsingError::InvalidDimension { side: 0 })
    ));
    assert!(matches!(
        run(0, &config(1, 1.0)),
        Err(IsingError::InvalidDimension { .. })
    ));
    assert!(matches!(
        run(8, &config(1, 0.0)),
        Err(IsingError::InvalidTemperature { .. })
    ));
}
