use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use ising_mc::{run_with_progress, scan, Averaging, ModelParams, SimConfig, SweepMode};

const L: usize = 64;
const N_TEMPS: usize = 12;
const N_MEMBERS: usize = 16;
const N_SWEEPS: usize = 2000;
const WARMUP: usize = 500;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = SimConfig {
        n_sweeps: N_SWEEPS,
        warmup_sweeps: WARMUP,
        params: ModelParams::new(2.269),
        ensemble_size: N_MEMBERS,
        seed: 42,
        sweep_mode: SweepMode::Metropolis,
        averaging: Averaging::History,
        autocorrelation_max_lag: Some(200),
        ..SimConfig::default()
    };

    println!(
        "Lattice: {}x{}  |  Members: {}  |  Sweeps: {} (warmup {})",
        L, L, N_MEMBERS, N_SWEEPS, WARMUP
    );
    println!("{}", "-".repeat(70));

    let pb = ProgressBar::new((N_SWEEPS * N_MEMBERS) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "{msg} [{bar:40}] {pos}/{len} [{elapsed_precise} < {eta_precise}, {per_sec}]",
        )?
        .progress_chars("=> "),
    );
    pb.set_message("sweeps");

    let t0 = Instant::now();
    let result = run_with_progress(L, &config, &|| pb.inc(1))?;
    pb.finish();
    let elapsed = t0.elapsed().as_secs_f64();

    let per_sweep = elapsed / (N_SWEEPS * N_MEMBERS) as f64 * 1000.0;
    println!("Total: {:.3} s  |  {:.3} ms/sweep", elapsed, per_sweep);
    println!(
        "T = {:.3}: <|m|> = {:.4}  <e> = {:.4}  chi = {:.3}  c = {:.3}  tau(m^2) = {:.1}",
        config.params.temperature,
        result.abs_magnetization,
        result.energy,
        result.susceptibility(),
        result.specific_heat(),
        result.mags2_tau().unwrap_or(f64::NAN),
    );
    println!("{}", "-".repeat(70));

    let temps: Vec<f64> = (0..N_TEMPS)
        .map(|i| 1.5 + 2.0 * i as f64 / (N_TEMPS - 1) as f64)
        .collect();
    let scan_config = SimConfig {
        n_sweeps: N_SWEEPS / 4,
        warmup_sweeps: WARMUP / 4,
        ensemble_size: 4,
        autocorrelation_max_lag: None,
        ..config
    };
    let t0 = Instant::now();
    println!("{:>6} {:>8} {:>8} {:>8} {:>8} {:>8}", "T", "|m|", "e", "chi", "c", "U4");
    for (t, r) in scan(32, &temps, &scan_config)? {
        println!(
            "{:>6.3} {:>8.4} {:>8.4} {:>8.3} {:>8.3} {:>8.4}",
            t,
            r.abs_magnetization,
            r.energy,
            r.susceptibility(),
            r.specific_heat(),
            r.binder_cumulant().unwrap_or(f64::NAN),
        );
    }
    println!("Scan: {:.3} s", t0.elapsed().as_secs_f64());
    Ok(())
}
