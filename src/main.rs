mod cli;

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use cpu_schedsim::models::JobSpec;
use cpu_schedsim::preset::PresetStore;
use cpu_schedsim::workload::WorkloadConfig;
use cpu_schedsim::{report, Policy, RunResult};

use crate::cli::{CliArgs, Command, InputArgs, OutputFormat, PresetAction};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    match args.command {
        Command::Run {
            input,
            policy,
            quantum,
            format,
        } => {
            let jobs = load_jobs(&input)?;
            let policy = Policy::from_name(&policy, quantum)?;
            let run = cpu_schedsim::simulate(&jobs, policy)
                .with_context(|| format!("simulation under {policy} failed"))?;
            print_runs(&[run], format)?;
        }
        Command::Compare {
            input,
            quantum,
            format,
        } => {
            let jobs = load_jobs(&input)?;
            let runs = cpu_schedsim::compare(&jobs, quantum).context("comparison failed")?;
            print_runs(&runs, format)?;
        }
        Command::Generate {
            count,
            seed,
            max_arrival,
            max_burst,
            priority_levels,
            out,
        } => {
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let jobs = WorkloadConfig::new(count)
                .with_max_arrival(max_arrival)
                .with_burst_range(1, max_burst)
                .with_priority_levels(priority_levels)
                .generate(&mut rng);
            let json = serde_json::to_string_pretty(&jobs)?;
            match out {
                Some(path) => {
                    fs::write(&path, json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    info!(path = %path.display(), jobs = jobs.len(), "wrote job set");
                }
                None => println!("{json}"),
            }
        }
        Command::Preset { action } => match action {
            PresetAction::Save { jobs, name, store } => {
                let jobs = read_job_file(&jobs)?;
                let mut presets = PresetStore::load_from(&store)
                    .with_context(|| format!("failed to load {}", store.display()))?;
                let saved = presets.save(name.as_deref(), &jobs);
                presets
                    .save_to(&store)
                    .with_context(|| format!("failed to write {}", store.display()))?;
                println!("Saved preset '{saved}' ({} jobs)", jobs.len());
            }
            PresetAction::List { store } => {
                let presets = PresetStore::load_from(&store)
                    .with_context(|| format!("failed to load {}", store.display()))?;
                for name in presets.names() {
                    println!("{name}");
                }
            }
        },
    }

    Ok(())
}

fn load_jobs(input: &InputArgs) -> Result<Vec<JobSpec>> {
    match (&input.jobs, &input.preset) {
        (Some(path), _) => read_job_file(path),
        (None, Some(name)) => {
            let store = PresetStore::load_from(&input.store)
                .with_context(|| format!("failed to load {}", input.store.display()))?;
            Ok(store.get(name)?)
        }
        (None, None) => anyhow::bail!("either --jobs or --preset is required"),
    }
}

fn read_job_file(path: &Path) -> Result<Vec<JobSpec>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse job list in {}", path.display()))
}

fn print_runs(runs: &[RunResult], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for run in runs {
                println!("{}", report::render_table(run));
                println!("{}\n", report::render_timeline(run));
            }
        }
        OutputFormat::Csv => {
            print!("{}", report::jobs_to_csv(runs));
            println!();
            print!("{}", report::summary_to_csv(runs));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(runs)?);
        }
    }
    Ok(())
}
