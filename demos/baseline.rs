//! Example: Copper-water nanofluid between a fixed and a sliding plate
//!
//! Runs the reference configuration, compares the result with the pure base
//! fluid and the closed-form surrogate, and writes the trajectory to CSV.
//!
//! **Physical System**:
//! - Lower plate fixed and held at Θ = 1
//! - Upper plate started impulsively with Navier slip, convective cooling
//! - Transverse magnetic field, viscous and Joule heating
//!
//! **Parameters**:
//! - Ha = 2, Re = 1, Pr = 6.2, Ec = 0.1, Bi = 0.5, λ = 0.1, G = 0.5
//! - Cu nanoparticles, φ = 2 %
//! - N = 50 intervals, τ_f = 2, Δτ = 0.02
//!
//! Run with `RUST_LOG=debug` to see the solver log.

use nanocouette::analysis::surrogate::estimate;
use nanocouette::analysis::{MetricsRecord, solve};
use nanocouette::output::export::csv::parameter_summary;
use nanocouette::output::export::{CsvConfig, CsvExporter, CsvMetadata, Exporter};
use nanocouette::physics::{MixtureProperties, ParameterSet, Particle, validate};
use nanocouette::solver::SolverConfiguration;

use std::time::Instant;

fn print_metrics(label: &str, m: &MetricsRecord) {
    println!(
        "{:<12} {:>10.5} {:>10.5} {:>8.3} {:>10.3} {:>8.3} {:>18}",
        label, m.cf_final, m.nu_final, m.tau_95, m.overshoot, m.settling_time, m.damping
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("═══════════════════════════════════════════════════════");
    println!("  MHD Nanofluid Couette Flow - Baseline Study");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Nanofluid ======

    let phi = 0.02;
    let mixture = MixtureProperties::compute(Particle::Copper, phi)?;
    let nanofluid = ParameterSet::baseline().with_nanofluid(&mixture);
    let base_fluid = ParameterSet::baseline().with_nanofluid(&MixtureProperties::base_fluid());

    println!("Nanofluid: {} in water, φ = {}", Particle::Copper.name(), phi);
    println!("  A1 (viscosity)      : {:.4}", mixture.viscosity);
    println!("  A2 (el. conduct.)   : {:.4}", mixture.electrical_conductivity);
    println!("  A3 (th. conduct.)   : {:.4}", mixture.thermal_conductivity);
    println!("  A4 (density)        : {:.4}", mixture.density);
    println!("  A5 (heat capacity)  : {:.4}", mixture.heat_capacity);
    println!("  Groups              : {}\n", parameter_summary(&nanofluid));

    // ====== Advisory validation ======

    let report = validate(&nanofluid);
    if report.warnings.is_empty() && report.errors.is_empty() {
        println!("Validation: ✓ no findings\n");
    } else {
        for warning in &report.warnings {
            println!("  ⚠ {}", warning);
        }
        for error in &report.errors {
            println!("  ✗ {}", error);
        }
        println!();
    }

    // ====== Solves ======

    let config = SolverConfiguration::time_evolution(2.0, 0.02, 10);

    println!("═══════════════════════════════════════════════════════");
    println!("  Running Simulations");
    println!("═══════════════════════════════════════════════════════\n");

    let start = Instant::now();
    let loaded = solve(&nanofluid, &config)?;
    println!("  Cu-water   : ✓ {:.3}s", start.elapsed().as_secs_f64());

    let start = Instant::now();
    let pure = solve(&base_fluid, &config)?;
    println!("  Water      : ✓ {:.3}s\n", start.elapsed().as_secs_f64());

    println!(
        "{:<12} {:>10} {:>10} {:>8} {:>10} {:>8} {:>18}",
        "Fluid", "Cf", "Nu", "τ95", "Over. %", "Settle", "Damping"
    );
    println!("{:-<82}", "");
    print_metrics("Cu-water", &loaded.metrics);
    print_metrics("Water", &pure.metrics);

    let guess = estimate(&nanofluid);
    println!(
        "{:<12} {:>10.5} {:>10.5} {:>8.3} {:>10.3} {:>8.3} {:>18}",
        "Surrogate", guess.cf_final, guess.nu_final, guess.tau_95, guess.overshoot, guess.settling_time, guess.damping
    );
    println!("  (surrogate confidence: {:?})", guess.confidence);

    // ====== Thermodynamics ======

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Entropy and Energy (Cu-water)");
    println!("═══════════════════════════════════════════════════════\n");

    println!("  Average Ns          : {:.6}", loaded.metrics.average_entropy);
    println!("  Average Be          : {:.4}", loaded.metrics.average_bejan);
    if let Some(last) = loaded.energy.last() {
        println!("  Kinetic energy      : {:.6}", last.kinetic);
        println!("  Thermal energy      : {:.6}", last.thermal);
        println!("  Viscous dissipation : {:.6}", last.viscous_dissipation);
        println!("  Joule heating       : {:.6}", last.joule_heating);
    }
    println!(
        "  Picard residual     : {:.2e} ({} capped steps)",
        loaded.metrics.max_residual, loaded.result.capped_steps
    );

    // ====== Export ======

    let path = "baseline_trajectory.csv";
    let metadata = CsvMetadata::from_result(&loaded.result).with_parameters(nanofluid);
    CsvExporter::new(CsvConfig::default().with_metadata(metadata)).export(&loaded.result, &loaded.energy, path)?;

    println!("\n✓ Trajectory written to {}", path);
    println!("═══════════════════════════════════════════════════════");

    Ok(())
}
