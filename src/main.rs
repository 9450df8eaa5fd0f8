use anyhow::{bail, Context};
use legforge::config::ConfigManager;
use legforge::data::{
    ClientConnector, DesignConnector, DesignTables, ForceConnector, MaterialCsvConnector, StatsExporter,
};
use legforge::engines::generation::{ConsoleProgressCallback, EvolutionEngine};
use legforge::engines::metrics::Termination;
use std::path::PathBuf;

const DEFAULT_CONFIG: &str = "legforge.toml";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG));

    let manager = ConfigManager::new();
    if config_path.exists() {
        manager
            .load_from_file(&config_path)
            .with_context(|| format!("loading {}", config_path.display()))?;
    } else {
        log::warn!("{} not found, using default configuration", config_path.display());
    }
    let config = manager.get()?;

    let materials = MaterialCsvConnector::load(&config.data.materials_path).context("loading materials")?;
    let forces = ForceConnector::load(&config.data.forces_path).context("loading force table")?;
    let client = ClientConnector::load(&config.data.client_path).context("loading client parameters")?;
    let tables = DesignTables::new(materials, forces, client).context("checking design tables")?;
    let seeds = match &config.data.seed_designs_path {
        Some(path) => DesignConnector::load(path).context("loading seed designs")?,
        None => Vec::new(),
    };

    let exporter = StatsExporter::new(&config.data.export_dir);
    let mut engine = EvolutionEngine::new(config.evolution.clone(), config.fitness.clone(), &tables);
    let mut callback = ConsoleProgressCallback;

    for run in 0..config.evolution.runs {
        println!("=== Run {} of {} ===", run + 1, config.evolution.runs);
        let result = match engine.run_seeded(run, &seeds, &mut callback) {
            Ok(result) => result,
            Err(e) if e.is_structural() => bail!("run {} aborted on a structural error: {}", run, e),
            Err(e) => return Err(e).with_context(|| format!("run {}", run)),
        };

        exporter.write_stats(run, &result.report.history)?;
        exporter.write_report(&result.report)?;

        match result.report.termination {
            Termination::Completed => println!(
                "Run {} completed {} generations with {} members",
                run,
                result.report.generations_completed(),
                result.population.len()
            ),
            Termination::DeadPopulation { generation } => {
                println!("Run {} ended with a dead population at generation {}", run, generation)
            }
        }

        for (rank, member) in result.report.members.iter().take(10).enumerate() {
            println!(
                "  #{:<2} member {:>6}  fitness {:>10.3}  mass {:>8.3} kg  cost {:>8.2}  valid {}",
                rank + 1,
                member.id,
                member.total_fitness,
                member.total_mass,
                member.total_cost,
                member.is_valid
            );
        }
    }

    Ok(())
}
