use anyhow::Context;
use clap::Parser;
use log::info;

use maze_pathfinding::batch_simulation::BatchSimulation;
use maze_pathfinding::config::Config;
use maze_pathfinding::simulation::Simulation;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();

    if config.batch_mode {
        info!(
            "Starting batch experiment: sizes {:?}, complexities {:?}",
            config.sizes, config.complexities
        );
        let mut batch_sim = BatchSimulation::new(config.clone());
        batch_sim.run().context("batch simulation failed")?;
        if !config.quiet {
            batch_sim.print_summary();
        }
        return Ok(());
    }

    info!(
        "Starting single maze analysis: {}x{}, complexity {}",
        config.rows, config.cols, config.complexity
    );
    if config.no_visualization {
        info!("Visualization disabled - running in fast mode");
    }

    let simulation = Simulation::new(config.clone()).context("failed to generate maze")?;
    let results = simulation.run().context("search failed")?;

    Simulation::print_comparison_results(&results);

    simulation
        .write_report(&config.report_file, &results)
        .with_context(|| format!("failed to write report to {}", config.report_file))?;

    Ok(())
}
