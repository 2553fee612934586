use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use symbios_evolve::{EvolutionConfig, StopReason, onemax};

#[derive(Parser, Debug)]
#[command(name = "symbios-evolve")]
#[command(about = "Solve One Max with a generational genetic algorithm")]
struct Args {
    /// TOML configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    genome_length: Option<usize>,

    #[arg(long)]
    population: Option<usize>,

    /// Crossover probability per adjacent pair
    #[arg(long)]
    cxpb: Option<f64>,

    /// Mutation probability per individual
    #[arg(long)]
    mutpb: Option<f64>,

    /// Flip probability per allele
    #[arg(long)]
    indpb: Option<f64>,

    #[arg(long)]
    tournament_size: Option<usize>,

    #[arg(long)]
    target: Option<f64>,

    #[arg(long)]
    max_generations: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write the per-generation logbook as JSON
    #[arg(long)]
    history: Option<PathBuf>,
}

impl Args {
    fn into_config(self) -> anyhow::Result<(EvolutionConfig, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => EvolutionConfig::from_file(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => EvolutionConfig::default(),
        };

        if let Some(v) = self.genome_length {
            config.genome_length = v;
        }
        if let Some(v) = self.population {
            config.population_size = v;
        }
        if let Some(v) = self.cxpb {
            config.crossover_prob = v;
        }
        if let Some(v) = self.mutpb {
            config.mutation_prob = v;
        }
        if let Some(v) = self.indpb {
            config.mutation_indpb = v;
        }
        if let Some(v) = self.tournament_size {
            config.tournament_size = v;
        }
        if self.target.is_some() {
            config.target_fitness = self.target;
        }
        if let Some(v) = self.max_generations {
            config.max_generations = v;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        Ok((config, self.history))
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let (config, history) = Args::parse().into_config()?;
    let mut ga = onemax::engine(&config)?;

    log::info!(
        "Evolving {} bits with {} individuals (target {})",
        config.genome_length,
        config.population_size,
        config.target()
    );

    let result = ga.run_with_callback(|record| {
        log::info!("-- Generation {} --", record.generation);
        if let Some(s) = &record.stats {
            log::info!("  Min {}", s.min);
            log::info!("  Max {}", s.max);
            log::info!("  Avg {}", s.mean);
            log::info!("  Std {}", s.std);
        }
    });

    match result.stop_reason {
        StopReason::TargetReached => log::info!(
            "Target reached after {} generations ({} evaluations)",
            result.generations,
            result.evaluations
        ),
        StopReason::MaxGenerations => log::info!(
            "Stopped at the generation cap ({}) with best fitness {:?}",
            result.generations,
            result.best.fitness().primary()
        ),
    }

    let bits: String = result
        .best
        .alleles()
        .iter()
        .map(|&b| if b { '1' } else { '0' })
        .collect();
    log::info!("Best individual: {bits}");

    if let Some(path) = history {
        let json = result.logbook.to_json()?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Logbook written to {}", path.display());
    }

    Ok(())
}
