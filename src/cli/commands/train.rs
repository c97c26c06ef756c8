//! Train command - Train a Q-learning agent on a grid world layout

use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use serde::Serialize;
use serde_json::to_writer_pretty;

use crate::{
    app::AgentConfig,
    cli::output::{format_number, print_episode_stats, print_kv, print_section, print_subsection},
    gridworld::{GridWorld, Layout},
    pipeline::{ProgressObserver, TrainingConfig, TrainingPipeline, TrainingResult},
    q_learning::QLearnAgent,
};

#[derive(Parser, Debug)]
#[command(about = "Train a Q-learning agent")]
pub struct TrainArgs {
    /// Built-in layout to play (tiny, small, corridor)
    #[arg(long, short = 'l', default_value = "small")]
    pub layout: String,

    /// Read the layout from a file instead of using a built-in one
    #[arg(long, conflicts_with = "layout")]
    pub layout_file: Option<PathBuf>,

    /// Total number of episodes (training and evaluation)
    #[arg(long, short = 'e', default_value_t = 1_000)]
    pub episodes: usize,

    /// Episodes before learning freezes
    #[arg(long, short = 'n')]
    pub num_training: Option<usize>,

    /// Learning rate α (0.0-1.0)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Exploration rate ε (0.0-1.0)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Moves allowed per episode before it times out
    #[arg(long, default_value_t = 200)]
    pub max_steps: usize,

    /// JSON file with agent parameters; flags override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    layout: String,
    max_steps: usize,
    config: &'a AgentConfig,
    result: &'a TrainingResult,
}

fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    // Treat trailing separators or missing filename as a directory target.
    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

fn resolve_config(args: &TrainArgs) -> Result<AgentConfig> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_json_file(path)
            .with_context(|| format!("Failed to load agent config {}", path.display()))?,
        None => AgentConfig::default(),
    };

    if let Some(alpha) = args.alpha {
        config = config.with_alpha(alpha);
    }
    if let Some(epsilon) = args.epsilon {
        config = config.with_epsilon(epsilon);
    }
    if let Some(gamma) = args.gamma {
        config = config.with_gamma(gamma);
    }
    if let Some(num_training) = args.num_training {
        config = config.with_num_training(num_training);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    config.validate()?;
    Ok(config)
}

fn resolve_layout(args: &TrainArgs) -> Result<(String, Layout)> {
    match &args.layout_file {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read layout file {}", path.display()))?;
            let layout = Layout::parse(&text)
                .with_context(|| format!("Invalid layout file {}", path.display()))?;
            Ok((path.display().to_string(), layout))
        }
        None => {
            let layout = Layout::builtin(&args.layout).ok_or_else(|| {
                anyhow!(
                    "Unknown layout '{}'. Use one of: {}",
                    args.layout,
                    Layout::BUILTIN.join(", ")
                )
            })?;
            Ok((args.layout.clone(), layout))
        }
    }
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = resolve_config(&args)?;
    let (layout_name, layout) = resolve_layout(&args)?;

    if args.episodes < config.num_training {
        log::warn!(
            "only {} episodes requested but {} are budgeted for training; no evaluation episodes will run",
            args.episodes,
            config.num_training
        );
    }

    print_section("Q-learning training");
    print_kv("Layout", &layout_name);
    print_kv(
        "Grid",
        &format!(
            "{}x{} ({} food)",
            layout.width(),
            layout.height(),
            layout.food().len()
        ),
    );
    print_kv("Episodes", &format_number(args.episodes));
    print_kv("Training episodes", &format_number(config.num_training));
    print_kv(
        "Parameters",
        &format!(
            "alpha={} epsilon={} gamma={}",
            config.alpha, config.epsilon, config.gamma
        ),
    );
    if let Some(seed) = config.seed {
        print_kv("Seed", &seed.to_string());
    }

    let mut world = GridWorld::new(layout, args.max_steps);
    let mut agent = QLearnAgent::from_config(&config)?;

    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_episodes: args.episodes,
        seed: None,
    });
    if !args.no_progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }

    let result = pipeline.run(&mut agent, &mut world)?;

    print_subsection("Training episodes");
    print_episode_stats(&result.training);
    print_subsection("Evaluation episodes");
    print_episode_stats(&result.evaluation);
    print_subsection("Agent");
    print_kv("Q-values stored", &format_number(result.table_entries));
    print_kv(
        "Final parameters",
        &format!(
            "alpha={} epsilon={}",
            result.parameters.alpha, result.parameters.epsilon
        ),
    );

    if let Some(raw) = &args.summary {
        let path = sanitize_summary_path(raw);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Failed to create summary file {}", path.display()))?;
        to_writer_pretty(
            file,
            &TrainingSummaryFile {
                layout: layout_name,
                max_steps: args.max_steps,
                config: &config,
                result: &result,
            },
        )
        .context("Failed to write training summary")?;
        println!("\nSummary written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_summary_path() {
        assert_eq!(
            sanitize_summary_path(Path::new("out/run")),
            PathBuf::from("out/run.json")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.JSON")),
            PathBuf::from("out/run.JSON")
        );
        assert_eq!(
            sanitize_summary_path(Path::new("out/run.txt")),
            PathBuf::from("out/run.json")
        );
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = TrainArgs::parse_from([
            "train",
            "--alpha",
            "0.5",
            "--num-training",
            "30",
            "--seed",
            "4",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.alpha, 0.5);
        assert_eq!(config.num_training, 30);
        assert_eq!(config.seed, Some(4));
        assert_eq!(config.epsilon, AgentConfig::DEFAULT_EPSILON);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let args = TrainArgs::parse_from(["train", "--gamma", "1.5"]);
        assert!(resolve_config(&args).is_err());
    }

    #[test]
    fn test_unknown_layout_is_rejected() {
        let args = TrainArgs::parse_from(["train", "--layout", "mediumClassic"]);
        let err = resolve_layout(&args).unwrap_err();
        assert!(err.to_string().contains("mediumClassic"));
    }
}
