//! Example: Sensitivity study and genetic search for heat transfer
//!
//! 1. Elasticities of τ₉₅, Cf and Nu to Ha, Re, Pr, Ec, Bi and λ around the
//!    baseline
//! 2. Genetic search over (Ha, Bi, λ) maximizing the lower-wall Nusselt
//!    number, stopped early once the best fitness stalls
//!
//! Run with `RUST_LOG=info` to see one log line per generation.

use nanocouette::analysis::optimizer::{
    GeneticConfig, GeneticOptimizer, Objective, SearchDimension, decode, solver_fitness,
};
use nanocouette::analysis::quick_solve;
use nanocouette::analysis::sensitivity::analyze;
use nanocouette::physics::{Parameter, ParameterSet};

use std::ops::ControlFlow;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let base = ParameterSet::baseline();

    println!("═══════════════════════════════════════════════════════");
    println!("  Sensitivity Around the Baseline (+10 %)");
    println!("═══════════════════════════════════════════════════════\n");

    let start = Instant::now();
    let report = analyze(&base)?;

    println!("{:<8} {:>10} {:>10} {:>10}", "Param", "E(τ95)", "E(Cf)", "E(Nu)");
    println!("{:-<41}", "");
    for entry in &report.entries {
        println!(
            "{:<8} {:>10.4} {:>10.4} {:>10.4}",
            entry.parameter, entry.tau_95, entry.cf_final, entry.nu_final
        );
    }
    println!("\n  7 quick solves in {:.2}s", start.elapsed().as_secs_f64());

    println!("\n═══════════════════════════════════════════════════════");
    println!("  Genetic Search: maximize Nu");
    println!("═══════════════════════════════════════════════════════\n");

    let dimensions = vec![
        SearchDimension::new(Parameter::Hartmann, 0.0, 6.0),
        SearchDimension::new(Parameter::Biot, 0.1, 10.0),
        SearchDimension::new(Parameter::Slip, 0.0, 1.0),
    ];
    let config = GeneticConfig::default().with_seed(42);
    let optimizer = GeneticOptimizer::new(dimensions.clone(), config)?;
    let fitness = solver_fitness(base, dimensions.clone(), Objective::MaximizeNusselt);

    let mut stalled = 0;
    let mut last_best = f64::NEG_INFINITY;
    let start = Instant::now();

    let outcome = optimizer.run(fitness, |progress| {
        println!(
            "  gen {:>2}: best Nu = {:.6}  genes = {:?}",
            progress.generation,
            progress.best_fitness,
            progress.best.genes.iter().map(|g| format!("{:.3}", g)).collect::<Vec<_>>()
        );

        stalled = if progress.best_fitness > last_best { 0 } else { stalled + 1 };
        last_best = progress.best_fitness;

        if stalled >= 8 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
    });

    println!(
        "\n  {} generations in {:.2}s{}",
        outcome.history.len(),
        start.elapsed().as_secs_f64(),
        if outcome.cancelled { " (stopped: no improvement in 8 generations)" } else { "" }
    );

    let best = decode(&base, &dimensions, &outcome.best.genes);
    let metrics = quick_solve(&best)?;

    println!("\nBest configuration:");
    for d in &dimensions {
        println!("  {:<8}: {:.4}", d.parameter, best.get(d.parameter));
    }
    println!("  Nu       : {:.6}", metrics.nu_final);
    println!("  Cf       : {:.6}", metrics.cf_final);
    println!("  Damping  : {}", metrics.damping);
    println!("═══════════════════════════════════════════════════════");

    Ok(())
}
